//! In-memory template store with built-in templates.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use hexa_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId},
    error::HexaResult,
};
use tracing::debug;

use crate::builtin_templates;

/// Thread-safe in-memory template store.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> HexaResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in templates.
    pub fn load_builtin(&self) -> HexaResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> HexaResult<Template> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateResolution {
                reason: format!("Template not found: {}", id),
            }
            .into()
        })
    }

    fn list(&self) -> HexaResult<Vec<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> HexaResult<()> {
        validator::validate_generator_template(&template)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        debug!(id = %template.id, "storing template");
        inner.insert(template.id.clone(), template);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexa_core::domain::{ArtifactKind, DomainError, TemplateMetadata};
    use hexa_core::error::HexaError;

    #[test]
    fn builtin_store_has_every_generator() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.len(), ArtifactKind::ALL.len());

        for kind in ArtifactKind::ALL {
            let template = store.get(&kind.template_id()).unwrap();
            assert_eq!(template.id.name(), kind.as_str());
        }
    }

    #[test]
    fn unknown_id_is_a_resolution_error() {
        let store = InMemoryStore::new();
        let err = store.get(&TemplateId::new("grpc", "1.0.0")).unwrap_err();
        assert!(matches!(
            err,
            HexaError::Application(ApplicationError::TemplateResolution { .. })
        ));
    }

    #[test]
    fn empty_templates_are_refused() {
        let template = Template::builder()
            .id(TemplateId::new("empty", "1.0.0"))
            .metadata(TemplateMetadata::new("Empty"))
            .build()
            .unwrap();

        let err = InMemoryStore::new().insert(template).unwrap_err();
        assert!(matches!(
            err,
            HexaError::Domain(DomainError::EmptyTemplate { .. })
        ));
    }
}
