use std::collections::BTreeMap;

use crate::RegisterRequest;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Field-keyed validation failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields
            .iter()
            .map(|(field, errors)| (*field, errors.as_slice()))
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, errors) in &self.fields {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {error}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Client-side checks run before a registration request is sent. The
/// backend remains authoritative.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let username = request.username.trim();
    if username.chars().count() < MIN_USERNAME_LEN {
        errors.push(
            "username",
            format!("Username must be at least {MIN_USERNAME_LEN} characters"),
        );
    }
    if !username.is_empty() && !is_valid_username(username) {
        errors.push(
            "username",
            "Username may contain only letters, digits and @/./+/-/_",
        );
    }

    if request.email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(request.email.trim()) {
        errors.push("email", "Enter a valid email address");
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    if request.password != request.password_confirm {
        errors.push("password_confirm", "Passwords do not match");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Matches `[\w.@+-]+`.
pub fn is_valid_username(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !host.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            username: "layla.m".to_string(),
            email: "layla@example.com".to_string(),
            password: "s3cretpass".to_string(),
            password_confirm: "s3cretpass".to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(validate_registration(&request()).is_ok());
    }

    #[test]
    fn reports_each_field() {
        let bad = RegisterRequest {
            username: "a!".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            password_confirm: "other".to_string(),
            ..request()
        };
        let errors = validate_registration(&bad).expect_err("invalid");
        assert_eq!(errors.get("username").map(<[String]>::len), Some(2));
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        assert_eq!(
            errors.get("password_confirm"),
            Some(&["Passwords do not match".to_string()][..])
        );
    }

    #[test]
    fn username_charset() {
        assert!(is_valid_username("user_name+tag@x-y.z"));
        assert!(is_valid_username("مستخدم"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.co"));
    }
}
