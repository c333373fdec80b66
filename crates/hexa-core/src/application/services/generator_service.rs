//! Generator Service - writes one layer of a feature slice.
//!
//! Each [`ArtifactKind`] maps to a built-in template in the store, a default
//! directory and a file-name pattern. The service renders the template with
//! the feature's variables and writes a single file.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        ArtifactKind, DomainValidator as validator, FeatureName, IdStrategy, ProjectName,
        RenderContext,
    },
    error::HexaResult,
};

/// Input for a single generator run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub kind: ArtifactKind,
    pub feature: Option<FeatureName>,
    /// Go module root used in import paths.
    pub project: ProjectName,
    /// Overrides the kind's default directory.
    pub output_dir: Option<PathBuf>,
    pub id_strategy: IdStrategy,
    pub overwrite: bool,
}

impl GenerateRequest {
    pub fn new(kind: ArtifactKind, project: ProjectName) -> Self {
        Self {
            kind,
            feature: None,
            project,
            output_dir: None,
            id_strategy: IdStrategy::default(),
            overwrite: false,
        }
    }

    pub fn feature(mut self, feature: FeatureName) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn target_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.kind.default_dir()))
    }
}

/// A rendered artifact, written or planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl GeneratedArtifact {
    /// Message shown after a successful write.
    pub fn success_message(&self) -> String {
        format!(
            "{} file '{}' created successfully!",
            self.kind.label(),
            self.path.display()
        )
    }
}

/// Generator description for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorInfo {
    pub kind: ArtifactKind,
    pub label: String,
    pub description: String,
    pub default_dir: String,
    pub file_pattern: String,
    pub requires_feature: bool,
}

impl From<ArtifactKind> for GeneratorInfo {
    fn from(kind: ArtifactKind) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            description: kind.description().to_string(),
            default_dir: kind.default_dir().to_string(),
            file_pattern: kind.file_pattern().to_string(),
            requires_feature: kind.requires_feature(),
        }
    }
}

pub struct GeneratorService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GeneratorService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Render and write the artifact.
    #[instrument(
        skip_all,
        fields(
            kind = %request.kind,
            feature = request.feature.as_ref().map(FeatureName::as_str),
            ids = %request.id_strategy
        )
    )]
    pub fn generate(&self, request: &GenerateRequest) -> HexaResult<GeneratedArtifact> {
        let artifact = self.plan(request)?;

        if self.filesystem.exists(&artifact.path) && !request.overwrite {
            return Err(ApplicationError::ArtifactExists {
                path: artifact.path.clone(),
            }
            .into());
        }

        if let Some(parent) = artifact.path.parent() {
            if !parent.as_os_str().is_empty() {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(&artifact.path, &artifact.content)?;

        info!(path = %artifact.path.display(), "Artifact written");
        Ok(artifact)
    }

    /// Render without touching the filesystem.
    pub fn plan(&self, request: &GenerateRequest) -> HexaResult<GeneratedArtifact> {
        let kind = request.kind;
        let file_name = kind.file_name(request.feature.as_ref())?;
        let dir = request.target_dir();

        let template = self.store.get(&kind.template_id())?;
        validator::validate_generator_template(&template)?;

        let context =
            RenderContext::for_feature(request.feature.as_ref(), &request.project, request.id_strategy);
        let structure = self.renderer.render(&template, &context, &dir)?;

        let content = structure
            .files()
            .next()
            .map(|f| f.content.clone())
            .ok_or_else(|| ApplicationError::RenderingFailed {
                reason: format!("template '{}' rendered no file", template.id),
            })?;

        let path = dir.join(file_name);
        debug!(path = %path.display(), bytes = content.len(), "Artifact planned");

        Ok(GeneratedArtifact {
            kind,
            path,
            content,
        })
    }

    /// Generators with a template in the store, in canonical order.
    pub fn generators(&self) -> HexaResult<Vec<GeneratorInfo>> {
        let available: Vec<ArtifactKind> = self
            .store
            .list()?
            .iter()
            .filter_map(|t| t.id.name().parse().ok())
            .collect();

        Ok(ArtifactKind::ALL
            .into_iter()
            .filter(|k| available.contains(k))
            .map(GeneratorInfo::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateRenderer, MockTemplateStore};
    use crate::domain::{
        DomainError, FileSpec, ProjectStructure, Template, TemplateContent, TemplateMetadata,
        TemplateNode,
    };
    use crate::error::HexaError;
    use std::path::Path;

    fn template_for(kind: ArtifactKind) -> Template {
        Template::builder()
            .id(kind.template_id())
            .metadata(TemplateMetadata::new(kind.label()))
            .add_node(TemplateNode::File(FileSpec::new(
                "artifact.go",
                TemplateContent::Parameterized("type {{FEATURE}} struct{}".into()),
            )))
            .build()
            .unwrap()
    }

    fn store() -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store
            .expect_get()
            .returning(|id| Ok(template_for(id.name().parse().unwrap())));
        store
    }

    fn renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|_, ctx, root| {
            Ok(ProjectStructure::new(root)
                .with_file("artifact.go", ctx.render("type {{FEATURE}} struct{}").into_bytes()))
        });
        renderer
    }

    fn request(kind: ArtifactKind) -> GenerateRequest {
        GenerateRequest::new(kind, ProjectName::parse("shop").unwrap())
            .feature(FeatureName::parse("User").unwrap())
    }

    #[test]
    fn writes_to_default_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("internal/core/services"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, c| {
                p == Path::new("internal/core/services/user_service.go")
                    && c == b"type User struct{}"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = GeneratorService::new(Box::new(store()), Box::new(renderer()), Box::new(fs));
        let artifact = service.generate(&request(ArtifactKind::Service)).unwrap();

        assert_eq!(
            artifact.success_message(),
            "Service file 'internal/core/services/user_service.go' created successfully!"
        );
    }

    #[test]
    fn missing_feature_is_rejected_before_rendering() {
        let mut store = MockTemplateStore::new();
        store.expect_get().never();

        let service = GeneratorService::new(
            Box::new(store),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockFilesystem::new()),
        );
        let req = GenerateRequest::new(ArtifactKind::Handler, ProjectName::parse("shop").unwrap());

        let err = service.generate(&req).unwrap_err();
        assert!(matches!(
            err,
            HexaError::Domain(DomainError::MissingRequiredField { field: "feature" })
        ));
    }

    #[test]
    fn existing_artifact_needs_overwrite() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let service = GeneratorService::new(Box::new(store()), Box::new(renderer()), Box::new(fs));
        let err = service.generate(&request(ArtifactKind::Model)).unwrap_err();
        assert!(matches!(
            err,
            HexaError::Application(ApplicationError::ArtifactExists { .. })
        ));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let service = GeneratorService::new(Box::new(store()), Box::new(renderer()), Box::new(fs));
        assert!(
            service
                .generate(&request(ArtifactKind::Model).overwrite(true))
                .is_ok()
        );
    }

    #[test]
    fn transactor_needs_no_feature() {
        let service = GeneratorService::new(
            Box::new(store()),
            Box::new(renderer()),
            Box::new(MockFilesystem::new()),
        );
        let req = GenerateRequest::new(ArtifactKind::Transactor, ProjectName::parse("shop").unwrap())
            .output_dir("db");

        let artifact = service.plan(&req).unwrap();
        assert_eq!(artifact.path, PathBuf::from("db/transactor.go"));
    }

    #[test]
    fn generators_follow_canonical_order() {
        let mut store = MockTemplateStore::new();
        store.expect_list().returning(|| {
            Ok(vec![
                template_for(ArtifactKind::Route),
                template_for(ArtifactKind::Model),
            ])
        });

        let service = GeneratorService::new(
            Box::new(store),
            Box::new(MockTemplateRenderer::new()),
            Box::new(MockFilesystem::new()),
        );
        let kinds: Vec<_> = service
            .generators()
            .unwrap()
            .into_iter()
            .map(|g| g.kind)
            .collect();
        assert_eq!(kinds, vec![ArtifactKind::Model, ArtifactKind::Route]);
    }
}
