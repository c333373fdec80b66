//! Substitution renderer for both template flavours.

use std::path::Path;

use hexa_core::{
    application::ports::TemplateRenderer,
    domain::{
        DomainValidator as validator, ProjectStructure, RenderContext, Template, TemplateContent,
        TemplateNode,
    },
    error::HexaResult,
};
use tracing::{instrument, trace};

/// Renders `Parameterized` text with `{{VARIABLE}}` substitution and `Raw`
/// bytes with the context's literal placeholder. Paths are never rewritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> HexaResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);

        for node in &template.tree.nodes {
            match node {
                TemplateNode::File(spec) => {
                    let content = render_content(&spec.content, context);
                    trace!(path = %spec.path, bytes = content.len(), "rendered file");
                    structure.add_file(spec.path.clone(), content);
                }
                TemplateNode::Directory(spec) => {
                    structure.add_directory(spec.path.clone());
                }
            }
        }

        validator::validate_project_structure(&structure)?;

        Ok(structure)
    }
}

fn render_content(content: &TemplateContent, ctx: &RenderContext) -> Vec<u8> {
    match content {
        TemplateContent::Parameterized(source) => ctx.render(source.as_str()).into_bytes(),
        TemplateContent::Raw(bytes) => ctx.rewrite_bytes(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexa_core::domain::{
        DirectorySpec, FileSpec, FsEntry, ProjectName, TemplateId, TemplateMetadata,
    };

    fn archive_template() -> Template {
        Template::builder()
            .id(TemplateId::new("hexagonal", "archive"))
            .metadata(TemplateMetadata::new("hexagonal"))
            .add_node(TemplateNode::Directory(DirectorySpec::new("go-template")))
            .add_node(TemplateNode::File(FileSpec::new(
                "go-template/go-template.go",
                TemplateContent::Raw(b"package go-template {{PROJECT_NAME}}".to_vec()),
            )))
            .build()
            .unwrap()
    }

    #[test]
    fn raw_files_only_get_placeholder_rewrite() {
        let ctx = RenderContext::for_project(&ProjectName::parse("orders").unwrap(), "go-template");
        let structure = SimpleRenderer
            .render(&archive_template(), &ctx, Path::new("orders"))
            .unwrap();

        let file = structure.files().next().unwrap();
        // `{{...}}` markers in archive files are project content, not variables.
        assert_eq!(file.content, b"package orders {{PROJECT_NAME}}");
    }

    #[test]
    fn names_are_never_rewritten() {
        let ctx = RenderContext::for_project(&ProjectName::parse("orders").unwrap(), "go-template");
        let structure = SimpleRenderer
            .render(&archive_template(), &ctx, Path::new("orders"))
            .unwrap();

        let paths: Vec<String> = structure
            .entries()
            .iter()
            .map(|e| match e {
                FsEntry::File(f) => f.path.as_str(),
                FsEntry::Directory(d) => d.path.as_str(),
            })
            .collect();
        assert_eq!(paths, vec!["go-template", "go-template/go-template.go"]);
        assert_eq!(structure.root(), Path::new("orders"));
    }

    #[test]
    fn parameterized_files_get_variables() {
        let template = Template::builder()
            .id(TemplateId::new("route", "1.0.0"))
            .metadata(TemplateMetadata::new("Route"))
            .add_node(TemplateNode::File(FileSpec::new(
                "route.go",
                TemplateContent::Parameterized("/{{X}}".into()),
            )))
            .build()
            .unwrap();
        let ctx = RenderContext::new().with_variable("X", "users");

        let structure = SimpleRenderer.render(&template, &ctx, Path::new(".")).unwrap();
        assert_eq!(structure.files().next().unwrap().content, b"/users");
    }
}
