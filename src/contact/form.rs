use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 254;
const MAX_SUBJECT_CHARS: usize = 200;

/// The raw fields of a contact form submission
/// Missing fields deserialize as empty strings so that they are reported as validation errors.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Validation error messages keyed by the name of the invalid field
#[derive(Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: String) {
        self.0.entry(field).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The error messages of a single field
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Whether a string is a bare email address with a dotted domain
/// Display-name forms such as `Jane <jane@example.com>` are rejected.
pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::parse_with_options(
        email,
        Options::default()
            .without_display_text()
            .with_required_tld(),
    )
    .is_ok()
}

fn check_required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if value.is_empty() {
        errors.add(field, String::from("This field is required."));
        return false;
    }
    true
}

fn check_max_length(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        );
    }
}

impl ContactForm {
    /// Trim every field and validate the result
    pub fn clean(self) -> Result<Self, ValidationErrors> {
        let cleaned = Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        };

        let mut errors = ValidationErrors::default();
        if check_required(&mut errors, "name", &cleaned.name) {
            check_max_length(&mut errors, "name", &cleaned.name, MAX_NAME_CHARS);
        }
        if check_required(&mut errors, "email", &cleaned.email) {
            check_max_length(&mut errors, "email", &cleaned.email, MAX_EMAIL_CHARS);
            if !is_valid_email(&cleaned.email) {
                errors.add("email", String::from("Enter a valid email address."));
            }
        }
        if check_required(&mut errors, "subject", &cleaned.subject) {
            check_max_length(&mut errors, "subject", &cleaned.subject, MAX_SUBJECT_CHARS);
        }
        check_required(&mut errors, "message", &cleaned.message);

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_valid() {
        assert_eq!(
            form(" Recruiter ", "job@company.com\n", "Job Offer", " We want to hire you. ").clean(),
            Ok(form(
                "Recruiter",
                "job@company.com",
                "Job Offer",
                "We want to hire you."
            ))
        );
    }

    #[test]
    fn test_missing_fields() {
        let errors = form("Spammer", "", "", "I have no email").clean().unwrap_err();
        assert_eq!(errors.field("email"), ["This field is required."]);
        assert_eq!(errors.field("subject"), ["This field is required."]);
        assert!(!errors.contains("name"));
        assert!(!errors.contains("message"));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let errors = form("  ", "a@b.com", "Hi", "\n\t").clean().unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("message"));
    }

    #[test]
    fn test_invalid_email() {
        let errors = form("Name", "not-an-email", "Hi", "Hello")
            .clean()
            .unwrap_err();
        assert_eq!(errors.field("email"), ["Enter a valid email address."]);
        assert_eq!(errors.to_string(), "email: Enter a valid email address.");
    }

    #[test]
    fn test_email_with_display_name() {
        let errors = form("Name", "Jane <jane@example.com>", "Hi", "Hello")
            .clean()
            .unwrap_err();
        assert_eq!(errors.field("email"), ["Enter a valid email address."]);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("jane.doe+site@mail.example.co.uk"));
        assert!(!is_valid_email("Jane <jane@example.com>"));
        assert!(!is_valid_email("<jane@example.com>"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane"));
    }

    #[test]
    fn test_too_long() {
        let errors = form(&"n".repeat(101), "a@b.com", &"s".repeat(200), "Hello")
            .clean()
            .unwrap_err();
        assert_eq!(
            errors.field("name"),
            ["Ensure this value has at most 100 characters (it has 101)."]
        );
        assert!(!errors.contains("subject"));
    }

    #[test]
    fn test_serialize() -> serde_json::Result<()> {
        let errors = form("", "bad", "Hi", "Hello").clean().unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors)?,
            serde_json::json!({
                "email": ["Enter a valid email address."],
                "name": ["This field is required."],
            })
        );
        Ok(())
    }
}
