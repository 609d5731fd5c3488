//! Status text composition.

/// Placeholder replaced by the rate value.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Template used for the daily rate post.
pub const DEFAULT_TEMPLATE: &str = "💡 Valor del dólar hoy en Venezuela: {value} VES #MaduroDolar";

/// A status template with a `{value}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTemplate {
    template: String,
}

impl StatusTemplate {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute every `{value}` occurrence with `value`.
    #[must_use]
    pub fn render(&self, value: &str) -> String {
        self.template.replace(VALUE_PLACEHOLDER, value)
    }
}

impl Default for StatusTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_template() {
        let text = StatusTemplate::default().render("130.500");
        assert_eq!(
            text,
            "💡 Valor del dólar hoy en Venezuela: 130.500 VES #MaduroDolar"
        );
        // 💡 is four bytes, ó two
        assert_eq!(text.chars().count() + 4, text.len());
    }

    #[test]
    fn test_render_without_placeholder() {
        let template = StatusTemplate::new("no value here");
        assert_eq!(template.render("1"), "no value here");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let template = StatusTemplate::new("{value} / {value}");
        assert_eq!(template.render("7"), "7 / 7");
        assert_eq!(template.as_str(), "{value} / {value}");
    }
}
