//! Reference lists offered to forms as suggestions.
//!
//! Neither list is enforced: `department` and `position` stay free text.

/// Known departments, in display order.
pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Product",
    "Design",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
];

/// Known position titles, in display order.
pub const POSITIONS: &[&str] = &[
    "Software Engineer",
    "Senior Software Engineer",
    "Product Manager",
    "UX Designer",
    "Marketing Specialist",
    "Sales Representative",
    "HR Coordinator",
];

/// Check whether `name` matches a known department, ignoring case.
pub fn is_known_department(name: &str) -> bool {
    DEPARTMENTS.iter().any(|d| d.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_position;

    #[test]
    fn known_department_ignores_case() {
        assert!(is_known_department("engineering"));
        assert!(is_known_department(" HR "));
        assert!(!is_known_department("Legal"));
    }

    #[test]
    fn every_catalog_position_is_valid() {
        for position in POSITIONS {
            assert_eq!(validate_position(Some(*position)), None, "{position}");
        }
    }
}
