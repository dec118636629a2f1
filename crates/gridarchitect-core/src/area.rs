//! Area name normalization and validation.

use thiserror::Error;

/// Area names seeded into a fresh editor.
pub const DEFAULT_AREAS: [&str; 4] = ["header", "sidebar", "main", "footer"];

/// Reasons an area cannot be declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AreaError {
    #[error("Area name is empty")]
    Empty,
    #[error("Area already exists: {0}")]
    Duplicate(String),
    #[error("Not a valid area identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Area limit reached ({0} areas)")]
    CapacityReached(usize),
}

/// Result type for area operations.
pub type AreaResult<T> = Result<T, AreaError>;

/// Trim a raw name and turn each internal whitespace run into a single `-`.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Check `^[A-Za-z_][\w-]*$` with ASCII word characters.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validate a raw name against the declared areas and the capacity limit.
/// Returns the normalized name on success.
pub fn check_new_area(raw: &str, declared: &[String], capacity: usize) -> AreaResult<String> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(AreaError::Empty);
    }
    if declared.iter().any(|a| *a == name) {
        return Err(AreaError::Duplicate(name));
    }
    if !is_valid_identifier(&name) {
        return Err(AreaError::InvalidIdentifier(name));
    }
    if declared.len() >= capacity {
        return Err(AreaError::CapacityReached(capacity));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  side bar  "), "side-bar");
        assert_eq!(normalize_name("a \t  b\nc"), "a-b-c");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_identifier_pattern() {
        assert!(is_valid_identifier("main"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("nav-2_b"));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("-lead"));
        assert!(!is_valid_identifier("a.b"));
        assert!(!is_valid_identifier("héader"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_check_new_area_rejections() {
        let areas = declared(&["header"]);
        assert_eq!(check_new_area("", &areas, 9), Err(AreaError::Empty));
        assert_eq!(
            check_new_area("1abc", &areas, 9),
            Err(AreaError::InvalidIdentifier("1abc".into()))
        );
        assert_eq!(
            check_new_area(" header ", &areas, 9),
            Err(AreaError::Duplicate("header".into()))
        );
        assert_eq!(
            check_new_area("nav", &areas, 1),
            Err(AreaError::CapacityReached(1))
        );
    }

    #[test]
    fn test_check_new_area_accepts() {
        let areas = declared(&["header"]);
        assert_eq!(check_new_area("side bar", &areas, 9), Ok("side-bar".into()));
    }
}
