use std::{collections::BTreeMap, fmt::Write as _};

use crate::error::TargetError;

/// Rendered element whose attributes carry the test labels.
pub trait AttributeTarget {
    /// Set (or overwrite) an attribute.
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), TargetError>;

    /// Remove an attribute; removing an absent attribute succeeds.
    fn remove_attribute(&mut self, name: &str) -> Result<(), TargetError>;
}

/// In-memory element, used for server-side rendering and in tests.
///
/// Attribute names follow the HTML attribute-name rules: they must be non-empty
/// and must not contain whitespace, quotes, `>`, `/`, `=` or control characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attributes whose name starts with `prefix`.
    pub fn attributes_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.attributes().filter(move |(k, _)| k.starts_with(prefix))
    }

    /// Render the element as an empty HTML tag.
    pub fn render(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(
                out,
                " {}=\"{}\"",
                name,
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        let _ = write!(out, "></{}>", self.tag);
        out
    }
}

impl AttributeTarget for MemoryElement {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), TargetError> {
        validate_name(name)?;
        self.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, name: &str) -> Result<(), TargetError> {
        self.attributes.remove(name);
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), TargetError> {
    let bad = |c: char| {
        c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=')
    };
    if name.is_empty() || name.chars().any(bad) {
        return Err(TargetError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(feature = "web")]
impl AttributeTarget for web_sys::Element {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), TargetError> {
        web_sys::Element::set_attribute(self, name, value).map_err(|e| TargetError::Rejected {
            name: name.to_string(),
            reason: format!("{e:?}"),
        })
    }

    fn remove_attribute(&mut self, name: &str) -> Result<(), TargetError> {
        web_sys::Element::remove_attribute(self, name).map_err(|e| TargetError::Rejected {
            name: name.to_string(),
            reason: format!("{e:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_remove_attributes() {
        let mut el = MemoryElement::new("button");
        el.set_attribute("data-test-type", "button").unwrap();
        el.set_attribute("class", "primary").unwrap();
        assert_eq!(el.attribute("data-test-type"), Some("button"));

        el.remove_attribute("data-test-type").unwrap();
        el.remove_attribute("never-set").unwrap();
        assert_eq!(el.attribute("data-test-type"), None);
        assert_eq!(el.attribute("class"), Some("primary"));
    }

    #[test]
    fn rejects_illegal_attribute_names() {
        let mut el = MemoryElement::new("div");
        for name in ["", "data-test-a b", "data-test-\"x", "a=b", "a/b", "a>b"] {
            assert_eq!(
                el.set_attribute(name, "v"),
                Err(TargetError::InvalidName(name.to_string())),
                "expected rejection for {name:?}"
            );
        }
        assert_eq!(el.attributes().count(), 0);
    }

    #[test]
    fn prefix_filter_only_returns_matching_attributes() {
        let mut el = MemoryElement::new("div");
        el.set_attribute("data-test-a", "1").unwrap();
        el.set_attribute("data-other", "2").unwrap();

        let found: Vec<_> = el.attributes_with_prefix("data-test-").collect();
        assert_eq!(found, vec![("data-test-a", "1")]);
    }

    #[test]
    fn render_escapes_values() {
        let mut el = MemoryElement::new("button");
        el.set_attribute("data-test-type", "button").unwrap();
        el.set_attribute("data-test-q", "a\"<b>&").unwrap();

        assert_eq!(
            el.render(),
            r#"<button data-test-q="a&quot;&lt;b&gt;&amp;" data-test-type="button"></button>"#
        );
    }
}
