use std::sync::LazyLock;

use regex::Regex;

use crate::error::FieldErrors;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 30;
pub const NAME_MAX: usize = 30;

pub fn email(errors: &mut FieldErrors, value: &str) {
    if value.is_empty() {
        errors.add("email", "This field is required.");
    } else if !EMAIL_RE.is_match(value) {
        errors.add("email", "Enter a valid email address.");
    }
}

pub fn password(errors: &mut FieldErrors, value: &str) {
    if value.is_empty() {
        errors.add("password", "This field is required.");
    } else if value.chars().count() < PASSWORD_MIN {
        errors.add(
            "password",
            "Ensure this field has at least 8 characters.",
        );
    } else if value.chars().count() > PASSWORD_MAX {
        errors.add(
            "password",
            "Ensure this field has no more than 30 characters.",
        );
    }
}

pub fn name(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > NAME_MAX {
        errors.add(field, "Ensure this field has no more than 30 characters.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        let mut errors = FieldErrors::new();
        email(&mut errors, "user@example.com");
        assert!(errors.is_empty());
    }

    #[test]
    fn rejects_email_without_domain() {
        let mut errors = FieldErrors::new();
        email(&mut errors, "bad email");
        assert!(!errors.is_empty());
    }

    #[test]
    fn password_length_bounds() {
        let mut errors = FieldErrors::new();
        password(&mut errors, "exactly8");
        password(&mut errors, &"x".repeat(30));
        assert!(errors.is_empty());

        let mut errors = FieldErrors::new();
        password(&mut errors, "short");
        assert!(!errors.is_empty());

        let mut errors = FieldErrors::new();
        password(&mut errors, &"x".repeat(31));
        assert!(!errors.is_empty());
    }

    #[test]
    fn name_length_bound() {
        let mut errors = FieldErrors::new();
        name(&mut errors, "first_name", &"h".repeat(65));
        assert!(!errors.is_empty());
    }
}
