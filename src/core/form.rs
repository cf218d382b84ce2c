//! # Contact Form
//!
//! The four fields a visitor fills in, plus the checks a browser would run
//! before letting the form submit (`required` on every field, `type="email"`
//! on the address).
//!
//! ```text
//! ContactForm
//! ├── name: String      // wire name "name"
//! ├── email: String     // wire name "email"
//! ├── title: String     // wire name "title" (shown as "Subject")
//! └── message: String   // wire name "message"
//! ```
//!
//! The wire names are bound by the EmailJS template on the other end, so they
//! must not change.

use serde::Serialize;
use std::fmt;

/// One of the four form inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Title,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Title, Field::Message];

    /// Template parameter name expected by the delivery service.
    pub const fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Title => "title",
            Field::Message => "message",
        }
    }

    /// Short label drawn on the input's border.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Title => "Subject",
            Field::Message => "Message",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Your Email",
            Field::Title => "Subject",
            Field::Message => "Message",
        }
    }

    pub const fn is_multiline(self) -> bool {
        matches!(self, Field::Message)
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Title,
            Field::Title => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Title => Field::Email,
            Field::Message => Field::Title,
        }
    }
}

/// Why the form refused to submit. Messages follow what browsers show for
/// the same native constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    Missing(Field),
    /// The email has no `@`.
    MissingAt,
    /// The email has an `@` but is otherwise malformed.
    InvalidEmail,
}

impl ValidationError {
    /// The field the cursor should jump to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::MissingAt | ValidationError::InvalidEmail => Field::Email,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing(_) => write!(f, "Please fill out this field."),
            ValidationError::MissingAt => {
                write!(f, "Please include an '@' in the email address.")
            }
            ValidationError::InvalidEmail => write!(f, "Please enter a valid email address."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Values captured at submission time, keyed by wire name when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub title: String,
    pub message: String,
}

/// Live form state, edited by the view and cleared after a confirmed send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub title: String,
    pub message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Title => &self.title,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Title => &mut self.title,
            Field::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// The values as sent. The email is trimmed the same way validation sees it.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            name: self.name.clone(),
            email: self.email.trim().to_string(),
            title: self.title.clone(),
            message: self.message.clone(),
        }
    }

    pub fn reset(&mut self) {
        for field in Field::ALL {
            self.get_mut(field).clear();
        }
    }

    /// Runs the required/email checks in tab order and reports the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in Field::ALL {
            let value = match field {
                Field::Email => self.email.trim(),
                _ => self.get(field),
            };
            if value.is_empty() {
                return Err(ValidationError::Missing(field));
            }
            if field == Field::Email {
                validate_email(&self.email)?;
            }
        }
        Ok(())
    }
}

/// Loose `local@domain` check, roughly what `<input type="email">` accepts.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::MissingAt);
    };
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
        && !email.chars().any(char::is_whitespace);
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}
