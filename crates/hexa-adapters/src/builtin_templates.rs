//! Built-in generator templates.
//!
//! One Go source template per [`ArtifactKind`], embedded at compile time
//! from `templates/*.go.tmpl`. Bodies use `{{VARIABLE}}` markers filled by
//! `RenderContext::for_feature`.

use hexa_core::domain::{
    ArtifactKind, DomainError, FileSpec, Template, TemplateContent, TemplateMetadata,
    TemplateNode, TemplateSource,
};
use tracing::instrument;

/// Go source body for a generator.
pub const fn source(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Model => include_str!("../templates/model.go.tmpl"),
        ArtifactKind::Domain => include_str!("../templates/domain.go.tmpl"),
        ArtifactKind::Port => include_str!("../templates/port.go.tmpl"),
        ArtifactKind::Repository => include_str!("../templates/repository.go.tmpl"),
        ArtifactKind::Service => include_str!("../templates/service.go.tmpl"),
        ArtifactKind::Handler => include_str!("../templates/handler.go.tmpl"),
        ArtifactKind::Route => include_str!("../templates/route.go.tmpl"),
        ArtifactKind::App => include_str!("../templates/app.go.tmpl"),
        ArtifactKind::Transactor => include_str!("../templates/transactor.go.tmpl"),
    }
}

/// Build the template for one generator.
pub fn template(kind: ArtifactKind) -> Result<Template, DomainError> {
    Template::builder()
        .id(kind.template_id())
        .metadata(
            TemplateMetadata::new(kind.label())
                .description(kind.description())
                .version(ArtifactKind::TEMPLATE_VERSION),
        )
        .add_node(TemplateNode::File(FileSpec::new(
            kind.file_pattern(),
            TemplateContent::Parameterized(TemplateSource::from(source(kind))),
        )))
        .build()
}

/// Every built-in generator template.
#[instrument]
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    ArtifactKind::ALL.into_iter().map(template).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexa_core::domain::{FeatureName, IdStrategy, ProjectName, RenderContext};

    fn render(kind: ArtifactKind, ids: IdStrategy) -> String {
        let feature = FeatureName::parse("Order").unwrap();
        let project = ProjectName::parse("shop").unwrap();
        let feature = kind.requires_feature().then_some(&feature);
        RenderContext::for_feature(feature, &project, ids).render(source(kind))
    }

    #[test]
    fn feature_templates_leave_no_markers() {
        for kind in ArtifactKind::ALL {
            for ids in [IdStrategy::Serial, IdStrategy::Uuid] {
                let out = render(kind, ids);
                assert!(!out.contains("{{"), "{kind} left a marker: {out}");
            }
        }
    }

    #[test]
    fn uuid_strategy_changes_model_and_domain_ids() {
        let serial = render(ArtifactKind::Model, IdStrategy::Serial);
        let uuid = render(ArtifactKind::Model, IdStrategy::Uuid);
        assert!(serial.contains("ID        uint `gorm:\"primaryKey;autoIncrement\" json:\"id\"`"));
        assert!(uuid.contains("ID        string `gorm:\"type:uuid;primaryKey;default:uuid_generate_v4()\" json:\"id\"`"));

        let domain = render(ArtifactKind::Domain, IdStrategy::Uuid);
        assert!(domain.contains("ID: \"00000000-0000-0000-0000-000000000000\","));
        assert!(render(ArtifactKind::Domain, IdStrategy::Serial).contains("ID: 0,"));
    }

    #[test]
    fn routes_use_plural_segment() {
        let out = render(ArtifactKind::Route, IdStrategy::Serial);
        assert!(out.contains("r.route.Get(\"/orders\", h.HandleGetOrders)"));
        assert!(out.contains("r.route.Delete(\"/orders/:id\", h.HandleDeleteOrder)"));
    }

    #[test]
    fn handlers_bind_id_for_each_strategy() {
        let serial = render(ArtifactKind::Handler, IdStrategy::Serial);
        assert!(serial.contains("\"strconv\""));
        assert!(serial.contains("DeleteOrder(ctx, uint(id))"));

        let uuid = render(ArtifactKind::Handler, IdStrategy::Uuid);
        assert!(!uuid.contains("strconv"));
        assert!(uuid.contains("id := c.Params(\"id\")"));
    }

    #[test]
    fn imports_use_project_module() {
        let out = render(ArtifactKind::Service, IdStrategy::Serial);
        assert!(out.contains("\"github.com/shop/internal/core/ports/order\""));
    }
}
