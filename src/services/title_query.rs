//! Search-query forms derived from a catalog title
//!
//! Catalog titles often carry decorations ("Alien: Covenant (2017)") that
//! metadata search endpoints match poorly, so the enrichment chain tries a few
//! derived forms of the same title.

/// How a fallback step turns a catalog title into a search query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    /// `normalize(title)`
    Normalized,
    /// The title as stored in the catalog
    Raw,
    /// `normalize(title)` followed by a release-year hint
    NormalizedWithYear(u16),
}

impl QueryForm {
    /// Builds the query string; empty when the title has nothing searchable
    pub fn build(&self, title: &str) -> String {
        match self {
            QueryForm::Normalized => normalize(title),
            QueryForm::Raw => title.trim().to_string(),
            QueryForm::NormalizedWithYear(year) => {
                let base = normalize(title);
                if base.is_empty() {
                    base
                } else {
                    format!("{} {}", base, year)
                }
            }
        }
    }
}

/// Strips a trailing parenthetical and separator punctuation
///
/// `"Spider-Man: No Way Home (2021)"` becomes `"Spider Man No Way Home"`.
/// Hyphens and colons turn into spaces and runs of whitespace collapse.
pub fn normalize(title: &str) -> String {
    let mut base = title.trim();

    if base.ends_with(')') {
        if let Some(open) = base.rfind('(') {
            base = &base[..open];
        }
    }

    base.split(|c: char| c.is_whitespace() || c == '-' || c == ':')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_year_and_separators() {
        assert_eq!(
            normalize("Spider-Man: No Way Home (2021)"),
            "Spider Man No Way Home"
        );
    }

    #[test]
    fn test_normalize_plain_title_unchanged() {
        assert_eq!(normalize("Inception"), "Inception");
        assert_eq!(normalize("  The   Matrix "), "The Matrix");
    }

    #[test]
    fn test_normalize_keeps_leading_parenthetical() {
        assert_eq!(normalize("(500) Days of Summer"), "(500) Days of Summer");
    }

    #[test]
    fn test_normalize_only_parenthetical() {
        assert_eq!(normalize("(2019)"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_non_year_suffix() {
        assert_eq!(normalize("Dune (Part Two)"), "Dune");
    }

    #[test]
    fn test_query_forms() {
        let title = "Alien: Covenant (2017)";
        assert_eq!(QueryForm::Normalized.build(title), "Alien Covenant");
        assert_eq!(QueryForm::Raw.build(title), "Alien: Covenant (2017)");
        assert_eq!(
            QueryForm::NormalizedWithYear(2023).build(title),
            "Alien Covenant 2023"
        );
    }

    #[test]
    fn test_year_form_empty_for_unsearchable_title() {
        assert_eq!(QueryForm::NormalizedWithYear(2023).build("   "), "");
    }
}
