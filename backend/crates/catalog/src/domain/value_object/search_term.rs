//! Title search term

/// Case-insensitive substring to match against titles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// `None` for a missing or empty term, which means "match everything"
    ///
    /// The term is used verbatim: whitespace is part of the substring.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.filter(|t| !t.is_empty()).map(|t| Self(t.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern with `%`, `_` and `\` escaped (escape char `\`)
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// In-memory equivalent of the `ILIKE` match
    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.0.to_lowercase())
    }
}
