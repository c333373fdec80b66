use crate::domain::{
    entities::{ProjectStructure, Template},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    /// Generator templates must produce at least one file.
    pub fn validate_generator_template(template: &Template) -> Result<(), DomainError> {
        template.validate()?;
        if template.file_count() == 0 {
            return Err(DomainError::EmptyTemplate {
                template_id: template.id.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
