/// Add/update form decoding and validation
///
/// Browsers submit every field as text, so the form keeps `age` as a string
/// and converts it during validation. Validation never fails fast: all field
/// problems are collected so the form can show them together.

use roster_shared::models::user::{NewUser, User, AGE_MAX};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A problem with one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field name
    pub field: String,

    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Looks up the first error for `field`
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

/// Raw add/update form submission
///
/// Missing fields decode as empty strings and are reported by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserForm {
    #[validate(length(min = 1, max = 100, message = "First name is required (up to 100 characters)"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name is required (up to 100 characters)"))]
    pub last_name: String,

    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,

    pub age: String,

    #[validate(length(min = 1, max = 100, message = "City is required (up to 100 characters)"))]
    pub city: String,
}

impl UserForm {
    /// Trims whitespace and lowercases the email address
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            age: self.age.trim().to_string(),
            city: self.city.trim().to_string(),
        }
    }

    /// Validates every field and converts the form into a `NewUser`
    ///
    /// Errors are sorted by field name so pages render them deterministically.
    pub fn validate_input(&self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors: Vec<FieldError> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        FieldError::new(
                            field.to_string(),
                            error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| "Invalid value".to_string()),
                        )
                    })
                })
                .collect(),
        };

        let age = match parse_age(&self.age) {
            Ok(age) => Some(age),
            Err(message) => {
                errors.push(FieldError::new("age", message));
                None
            }
        };

        match age {
            Some(age) if errors.is_empty() => Ok(NewUser {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                email: self.email.clone(),
                age,
                city: self.city.clone(),
            }),
            _ => {
                errors.sort_by(|a, b| a.field.cmp(&b.field));
                Err(errors)
            }
        }
    }
}

impl From<&User> for UserForm {
    /// Pre-fills the update form
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            age: user.age.to_string(),
            city: user.city.clone(),
        }
    }
}

fn parse_age(raw: &str) -> Result<i32, String> {
    if raw.is_empty() {
        return Err("Age is required".to_string());
    }

    let age: i32 = raw
        .parse()
        .map_err(|_| "Age must be a whole number".to_string())?;

    if !(0..=AGE_MAX).contains(&age) {
        return Err(format!("Age must be between 0 and {}", AGE_MAX));
    }

    Ok(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> UserForm {
        UserForm {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            age: "25".to_string(),
            city: "New York".to_string(),
        }
    }

    #[test]
    fn test_valid_form_converts() {
        let user = sample_form().validate_input().unwrap();

        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "john.doe@example.com");
        assert_eq!(user.age, 25);
        assert_eq!(user.city, "New York");
    }

    #[test]
    fn test_normalized_trims_and_lowercases() {
        let form = UserForm {
            first_name: "  John ".to_string(),
            email: " John.Doe@Example.COM ".to_string(),
            age: " 25 ".to_string(),
            ..sample_form()
        }
        .normalized();

        assert_eq!(form.first_name, "John");
        assert_eq!(form.email, "john.doe@example.com");
        assert_eq!(form.validate_input().unwrap().age, 25);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = UserForm::default().validate_input().unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        for field in ["age", "city", "email", "first_name", "last_name"] {
            assert!(fields.contains(&field), "missing error for {field}");
        }

        let mut sorted = fields.clone();
        sorted.sort();
        assert_eq!(fields, sorted);
        assert_eq!(error_for(&errors, "age"), Some("Age is required"));
    }

    #[test]
    fn test_invalid_email() {
        let form = UserForm {
            email: "not-an-email".to_string(),
            ..sample_form()
        };

        let errors = form.validate_input().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(error_for(&errors, "email"), Some("Enter a valid email address"));
    }

    #[test]
    fn test_age_must_be_numeric_and_in_range() {
        for (raw, expected) in [
            ("abc", "Age must be a whole number"),
            ("25.5", "Age must be a whole number"),
            ("-1", "Age must be between 0 and 150"),
            ("151", "Age must be between 0 and 150"),
        ] {
            let form = UserForm {
                age: raw.to_string(),
                ..sample_form()
            };
            let errors = form.validate_input().unwrap_err();
            assert_eq!(error_for(&errors, "age"), Some(expected), "age {raw:?}");
        }

        for raw in ["0", "150"] {
            let form = UserForm {
                age: raw.to_string(),
                ..sample_form()
            };
            assert!(form.validate_input().is_ok(), "age {raw:?}");
        }
    }

    #[test]
    fn test_overlong_name_rejected() {
        let form = UserForm {
            last_name: "x".repeat(101),
            ..sample_form()
        };

        let errors = form.validate_input().unwrap_err();
        assert_eq!(
            error_for(&errors, "last_name"),
            Some("Last name is required (up to 100 characters)")
        );
    }

    #[test]
    fn test_from_user_prefills() {
        let now = chrono::Utc::now();
        let user = User {
            id: 7,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
            city: "Boston".to_string(),
            created_at: now,
            updated_at: now,
        };

        let form = UserForm::from(&user);
        assert_eq!(form.age, "30");
        assert_eq!(form.validate_input().unwrap().email, "alice@example.com");
    }
}
