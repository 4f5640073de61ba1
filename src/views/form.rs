//! Form field state and validation
//!
//! A [`Field`] mirrors one form control: its raw string value plus an
//! invalid mark. Validation marks offending fields and reports a single
//! boolean; the caller surfaces one generic notice rather than enumerating
//! failures.

use once_cell::sync::Lazy;
use regex::Regex;

/// Basic `local@domain.tld` shape; full address validation is the server's job
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// One form control: raw value plus validation mark
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub value: String,
    pub invalid: bool,
}

impl Field {
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        // Typing into a marked control clears the mark once it has content
        if self.invalid && !self.value.trim().is_empty() {
            self.invalid = false;
        }
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Trimmed value, with the empty string normalized to `None`
    pub fn optional(&self) -> Option<String> {
        let trimmed = self.trimmed();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Required check: non-empty after trimming. Marks the field on failure.
    pub fn check_required(&mut self) -> bool {
        self.invalid = self.trimmed().is_empty();
        !self.invalid
    }

    /// Email check on a required field. Marks the field on failure.
    pub fn check_email(&mut self) -> bool {
        self.invalid = !is_valid_email(self.trimmed());
        !self.invalid
    }

    /// Required integer check; returns the parsed value or marks the field
    pub fn check_int(&mut self) -> Option<i32> {
        match self.trimmed().parse::<i32>() {
            Ok(value) => {
                self.invalid = false;
                Some(value)
            }
            Err(_) => {
                self.invalid = true;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.invalid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ada@analytical.engine"));
        assert!(is_valid_email("a.b+c@d.example.org"));
        assert!(!is_valid_email("ada@analytical"));
        assert!(!is_valid_email("ada analytical@x.y"));
        assert!(!is_valid_email("@missing.local"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_required_marks_field() {
        let mut field = Field::default();
        field.set("   ");
        assert!(!field.check_required());
        assert!(field.invalid);

        field.set("Dune");
        assert!(field.check_required());
        assert!(!field.invalid);
    }

    #[test]
    fn test_typing_clears_mark() {
        let mut field = Field::default();
        assert!(!field.check_required());
        field.set("x");
        assert!(!field.invalid);
    }

    #[test]
    fn test_optional_normalizes_empty_to_none() {
        let mut field = Field::default();
        field.set("  ");
        assert_eq!(field.optional(), None);
        field.set(" 978-0 ");
        assert_eq!(field.optional(), Some("978-0".to_string()));
    }

    #[test]
    fn test_int_parse() {
        let mut field = Field::default();
        field.set("42");
        assert_eq!(field.check_int(), Some(42));
        field.set("forty-two");
        assert_eq!(field.check_int(), None);
        assert!(field.invalid);
    }
}
