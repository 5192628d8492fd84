use log::{debug, warn};

/// Token marking the recipient's name in HTML and plain-text bodies.
pub const NAME_TOKEN: &str = "{{FIRST_LASTNAME}}";

/// Token marking the recipient's name in markup certificate templates.
pub const MARKUP_NAME_TOKEN: &str = "@@FIRST_LASTNAME@@";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    None,
    Html,
    Latex,
}

/// Substitutes a single placeholder token, escaping the value for the
/// target format.
#[derive(Debug, Clone)]
pub struct PlaceholderReplacer {
    token: String,
    escape: Escape,
}

impl PlaceholderReplacer {
    pub fn new(token: impl Into<String>, escape: Escape) -> Self {
        Self {
            token: token.into(),
            escape,
        }
    }

    pub fn html() -> Self {
        Self::new(NAME_TOKEN, Escape::Html)
    }

    pub fn plain() -> Self {
        Self::new(NAME_TOKEN, Escape::None)
    }

    pub fn markup() -> Self {
        Self::new(MARKUP_NAME_TOKEN, Escape::Latex)
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    fn escape_latex(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\\' => escaped.push_str(r"\textbackslash{}"),
                '~' => escaped.push_str(r"\textasciitilde{}"),
                '^' => escaped.push_str(r"\textasciicircum{}"),
                '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                _ => escaped.push(c),
            }
        }
        escaped
    }

    fn escape(&self, value: &str) -> String {
        match self.escape {
            Escape::None => value.to_string(),
            Escape::Html => Self::escape_html(value),
            Escape::Latex => Self::escape_latex(value),
        }
    }

    pub fn replace(&self, content: &str, value: &str) -> String {
        let count = content.matches(&self.token).count();
        if count == 0 {
            warn!("Placeholder '{}' not found in template", self.token);
            return content.to_string();
        }

        debug!("Replacing {} occurrences of '{}'", count, self.token);
        content.replace(&self.token, &self.escape(value))
    }
}
