//! Rendering context: the values substituted into templates.
//!
//! Two substitution modes exist and never mix:
//!
//! - `render` replaces `{{VARIABLE}}` markers in built-in generator text.
//! - `rewrite_bytes` replaces every occurrence of one literal token (for
//!   archive templates, `go-template`) with the project name. No other byte
//!   changes, so binary files and arbitrary encodings survive untouched.

use std::collections::BTreeMap;

use crate::domain::value_objects::{FeatureName, IdStrategy, ProjectName};

/// Literal token and its replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub token: String,
    pub replacement: String,
}

/// Immutable set of substitution values.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | `orders` | project name, verbatim |
/// | `FEATURE` | `User` | feature name, verbatim |
/// | `FEATURE_LOWER` | `user` | lower-cased feature |
/// | `FEATURE_PLURAL_LOWER` | `users` | naive plural, lower-cased |
/// | `ID_TYPE` | `uint` / `string` | ID strategy |
/// | `ID_TAG` | gorm struct tag | ID strategy |
/// | `DEFAULT_ID` | `0` / nil UUID literal | ID strategy |
/// | `ID_PARAM`, `ID_ARG`, `ID_IMPORT` | handler snippets | ID strategy |
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
    placeholder: Option<Placeholder>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for materializing an archive template: rewrite `token` to the
    /// project name.
    pub fn for_project(project: &ProjectName, token: impl Into<String>) -> Self {
        Self::new()
            .with_variable("PROJECT_NAME", project.as_str())
            .with_placeholder(token, project.as_str())
    }

    /// Context for one generator run.
    pub fn for_feature(
        feature: Option<&FeatureName>,
        project: &ProjectName,
        ids: IdStrategy,
    ) -> Self {
        let mut ctx = Self::new()
            .with_variable("PROJECT_NAME", project.as_str())
            .with_variable("ID_TYPE", ids.id_type())
            .with_variable("ID_TAG", ids.id_tag())
            .with_variable("DEFAULT_ID", ids.default_id())
            .with_variable("ID_PARAM", ids.id_param())
            .with_variable("ID_ARG", ids.id_arg())
            .with_variable("ID_IMPORT", ids.id_import());

        if let Some(feature) = feature {
            ctx = ctx
                .with_variable("FEATURE", feature.as_str())
                .with_variable("FEATURE_LOWER", feature.lower())
                .with_variable("FEATURE_PLURAL_LOWER", feature.plural_lower());
        }

        ctx
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_placeholder(
        mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.placeholder = Some(Placeholder {
            token: token.into(),
            replacement: replacement.into(),
        });
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    /// Replace `{{VARIABLE}}` markers in a single left-to-right pass.
    ///
    /// Substituted values are never rescanned. Unknown markers are left as
    /// written; `{{{FEATURE}}}` keeps the outer braces.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let value = after
                .find("}}")
                .and_then(|end| self.get(&after[..end]).map(|v| (v, end)));

            match value {
                Some((value, end)) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    // Emit one brace so `{{{X}}}` still matches at the next offset.
                    out.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Apply the literal placeholder to raw bytes. Without a placeholder the
    /// input is returned unchanged.
    pub fn rewrite_bytes(&self, content: &[u8]) -> Vec<u8> {
        match &self.placeholder {
            Some(p) => replace_all_bytes(content, p.token.as_bytes(), p.replacement.as_bytes()),
            None => content.to_vec(),
        }
    }
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to
/// right. An empty needle matches nothing.
pub fn replace_all_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> ProjectName {
        ProjectName::parse(name).unwrap()
    }

    #[test]
    fn rewrites_every_placeholder_occurrence() {
        let ctx = RenderContext::for_project(&project("orders"), "go-template");
        let out = ctx.rewrite_bytes(b"package go-template\n// go-template service");
        assert_eq!(out, b"package orders\n// orders service");
    }

    #[test]
    fn rewrite_leaves_binary_bytes_alone() {
        let ctx = RenderContext::for_project(&project("x"), "go-template");
        let input = [0u8, 159, 146, 150, b'g', 0xff];
        assert_eq!(ctx.rewrite_bytes(&input), input.to_vec());
    }

    #[test]
    fn replacement_is_non_overlapping() {
        assert_eq!(replace_all_bytes(b"aaaa", b"aa", b"b"), b"bb".to_vec());
        assert_eq!(replace_all_bytes(b"aaa", b"aa", b"b"), b"ba".to_vec());
        assert_eq!(replace_all_bytes(b"abc", b"", b"x"), b"abc".to_vec());
    }

    #[test]
    fn replacement_containing_token_is_not_rescanned() {
        let ctx = RenderContext::new().with_placeholder("go-template", "go-template-api");
        assert_eq!(ctx.rewrite_bytes(b"go-template"), b"go-template-api".to_vec());
    }

    #[test]
    fn renders_feature_variables() {
        let feature = FeatureName::parse("Order").unwrap();
        let ctx = RenderContext::for_feature(Some(&feature), &project("shop"), IdStrategy::Serial);
        let out = ctx.render("type {{FEATURE}} struct{} // {{FEATURE_LOWER}} {{FEATURE_PLURAL_LOWER}} {{PROJECT_NAME}}");
        assert_eq!(out, "type Order struct{} // order orders shop");
    }

    #[test]
    fn unknown_and_nested_markers() {
        let ctx = RenderContext::new().with_variable("X", "1");
        assert_eq!(ctx.render("{{UNKNOWN}}"), "{{UNKNOWN}}");
        assert_eq!(ctx.render("{{{X}}}"), "{1}");
        assert_eq!(ctx.render("{{X}}{{X}}"), "11");
        assert_eq!(ctx.render("open {{ only"), "open {{ only");
    }

    #[test]
    fn values_are_not_rescanned() {
        let ctx = RenderContext::new()
            .with_variable("A", "{{B}}")
            .with_variable("B", "boom");
        assert_eq!(ctx.render("{{A}}"), "{{B}}");
    }
}
