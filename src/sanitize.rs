//! Input hygiene for free-text search and identifier query parameters.
//!
//! Everything here is pure and infallible: invalid input collapses to an
//! empty string or `None`, and callers treat that as "omit this filter".

use uuid::Uuid;

pub const SEARCH_MAX: usize = 100;
pub const SLUG_MAX: usize = 50;
pub const TEXT_MAX: usize = 200;

// Latin, Cyrillic and Arabic letters, digits, whitespace and hyphen.
// Matches the scripts used by the localized name/title columns.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || c == '-'
        || ('\u{0400}'..='\u{04FF}').contains(&c)
        || ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Strip disallowed characters, trim, and truncate to `max` characters.
pub fn clean_text(raw: &str, max: usize) -> String {
    let kept: String = raw.chars().filter(|c| is_allowed(*c)).collect();
    kept.trim().chars().take(max).collect()
}

/// Sanitize a free-text search query. Empty output disables the filter.
pub fn clean_search(raw: &str) -> String {
    clean_text(raw, SEARCH_MAX)
}

/// Sanitize a slug candidate.
pub fn clean_slug(raw: &str) -> String {
    clean_text(raw, SLUG_MAX)
}

/// Parse an identifier only if it has the canonical hyphenated
/// 8-4-4-4-12 shape. Braced, urn- and simple-form UUIDs are rejected so a
/// malformed filter parameter is silently dropped rather than forwarded.
pub fn parse_uuid(raw: &str) -> Option<Uuid> {
    let bytes = raw.as_bytes();
    if bytes.len() != 36 {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if *b != b'-' {
                    return None;
                }
            }
            _ => {
                if !b.is_ascii_hexdigit() {
                    return None;
                }
            }
        }
    }
    Uuid::parse_str(raw).ok()
}

/// Convenience for optional query parameters: `None` when the parameter is
/// absent, empty, or not a canonical identifier.
pub fn parse_uuid_param(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(parse_uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowed_scripts() {
        assert_eq!(clean_search("whey protein"), "whey protein");
        assert_eq!(clean_search("протеин 100"), "протеин 100");
        assert_eq!(clean_search("بروتين"), "بروتين");
        assert_eq!(clean_search("iso-whey"), "iso-whey");
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(clean_search("whey'; DROP TABLE--"), "whey DROP TABLE--");
        assert_eq!(clean_search("a%b_c"), "abc");
        assert_eq!(clean_search("<script>"), "script");
    }

    #[test]
    fn all_disallowed_collapses_to_empty() {
        assert_eq!(clean_search("%$#@!();'"), "");
        assert_eq!(clean_search("   "), "");
    }

    #[test]
    fn truncates_after_trim() {
        let long = "a".repeat(500);
        assert_eq!(clean_search(&long).len(), SEARCH_MAX);
        assert_eq!(clean_slug(&long).len(), SLUG_MAX);
        assert_eq!(clean_text(&long, TEXT_MAX).len(), TEXT_MAX);
    }

    #[test]
    fn accepts_canonical_uuid_only() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()), Some(id));
        assert_eq!(parse_uuid(&id.simple().to_string()), None);
        assert_eq!(parse_uuid(&format!("{{{id}}}")), None);
        assert_eq!(parse_uuid("not-a-uuid"), None);
        assert_eq!(parse_uuid(""), None);
    }

    #[test]
    fn optional_param_drops_malformed_input() {
        assert_eq!(parse_uuid_param(None), None);
        assert_eq!(parse_uuid_param(Some("xyz")), None);
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid_param(Some(&id.to_string())), Some(id));
    }
}
