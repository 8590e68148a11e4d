use std::sync::LazyLock;

use regex::Regex;

/// Fewest digits a phone number may have.
pub const MIN_PHONE_DIGITS: usize = 7;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

fn looks_like_email(s: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(s))
}

/// Why a lead was not submitted. The display text is shown to the visitor verbatim.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadValidationError {
    /// Name or phone left blank.
    #[error("Please fill in your name and phone number.")]
    MissingNameOrPhone,
    /// Too few digits in the phone number.
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
    /// An email was given but is malformed.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Raw form fields in document order, as `FormData` would carry them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LeadForm {
    /// `(name, value)` pairs.
    pub fields: Vec<(String, String)>,
}

impl LeadForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LeadForm::set`].
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, appending it if new.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    /// Value of the first field with this name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Clear every value, keeping the fields.
    pub fn reset(&mut self) {
        for (_, v) in &mut self.fields {
            v.clear();
        }
    }

    fn trimmed(&self, name: &str) -> String {
        self.get(name).map(str::trim).unwrap_or_default().to_string()
    }

    /// The visitor's name: whichever of the `contact` or `name` fields comes first.
    pub fn name(&self) -> String {
        self.fields
            .iter()
            .find(|(k, _)| k == "contact" || k == "name")
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Check the fields in the order the visitor sees errors.
    pub fn validate(&self) -> Result<Lead, LeadValidationError> {
        let name = self.name();
        let phone = self.trimmed("phone");
        let email = self.trimmed("email");

        if name.is_empty() || phone.is_empty() {
            return Err(LeadValidationError::MissingNameOrPhone);
        }
        let phone_digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if phone_digits.len() < MIN_PHONE_DIGITS {
            return Err(LeadValidationError::InvalidPhone);
        }
        if !email.is_empty() && !looks_like_email(&email) {
            return Err(LeadValidationError::InvalidEmail);
        }
        Ok(Lead {
            name,
            phone,
            phone_digits,
            email: (!email.is_empty()).then_some(email),
        })
    }
}

/// A lead that passed validation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Lead {
    /// Trimmed name.
    pub name: String,
    /// Phone as typed, trimmed.
    pub phone: String,
    /// Digits of the phone number only.
    pub phone_digits: String,
    /// Email, if given.
    pub email: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/lead/form.rs"]
mod tests;
