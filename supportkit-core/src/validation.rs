//! Syntactic sanity checks on the form fields.
//!
//! This is deliberately shallow: an address only needs an `@`. Anything
//! stricter is left to whoever reads the stored feedback.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields: email is required")]
    MissingEmail,

    #[error("Please fill in all fields: email must contain '@'")]
    MalformedEmail,

    #[error("Please fill in all fields: description is required")]
    MissingDescription,
}

/// Checks the fields in display order and reports the first rule that fails.
pub fn validate(email: &str, description: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(ValidationError::MalformedEmail);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_input() {
        assert_eq!(validate("a@b", "x"), Ok(()));
        assert_eq!(validate("  a@b.com  ", "\n hi \t"), Ok(()));
    }

    #[test]
    fn rejects_blank_email() {
        assert_eq!(validate("", "x"), Err(ValidationError::MissingEmail));
        assert_eq!(validate(" \t\n", "x"), Err(ValidationError::MissingEmail));
    }

    #[test]
    fn rejects_email_without_at() {
        assert_eq!(validate("not-an-email", "x"), Err(ValidationError::MalformedEmail));
    }

    #[test]
    fn rejects_blank_description() {
        assert_eq!(validate("a@b.com", ""), Err(ValidationError::MissingDescription));
        assert_eq!(validate("a@b.com", "   "), Err(ValidationError::MissingDescription));
    }

    #[test]
    fn lone_at_sign_passes() {
        // Only the '@' rule applies once the field is non-blank.
        assert_eq!(validate("@", "x"), Ok(()));
    }

    #[test]
    fn matches_rule_over_sample_grid() {
        let emails = ["", " ", "a", "a@b", " a@b ", "@", "x y", "\t@\t"];
        let descriptions = ["", " ", "x", " hi ", "\n"];

        for email in emails {
            for description in descriptions {
                let expected = !email.trim().is_empty()
                    && email.contains('@')
                    && !description.trim().is_empty();
                assert_eq!(
                    validate(email, description).is_ok(),
                    expected,
                    "email={email:?} description={description:?}"
                );
            }
        }
    }
}
