//! Contact form validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, EmailError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    EmptyName,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("unknown subject: {0}")]
    InvalidSubject(String),

    #[error("message is required")]
    EmptyMessage,
}

/// What the message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    #[default]
    General,
    Reservation,
    Feedback,
    Catering,
    Careers,
    Complaint,
}

impl ContactSubject {
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::Reservation,
        Self::Feedback,
        Self::Catering,
        Self::Careers,
        Self::Complaint,
    ];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Reservation => "reservation",
            Self::Feedback => "feedback",
            Self::Catering => "catering",
            Self::Careers => "careers",
            Self::Complaint => "complaint",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General Inquiry",
            Self::Reservation => "Reservation",
            Self::Feedback => "Feedback",
            Self::Catering => "Catering & Events",
            Self::Careers => "Careers",
            Self::Complaint => "Complaint",
        }
    }
}

impl std::str::FromStr for ContactSubject {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.value() == s.trim())
            .ok_or_else(|| ContactError::InvalidSubject(s.to_owned()))
    }
}

/// Raw contact form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
}

impl ContactForm {
    /// Validate the submission. A blank subject means a general inquiry.
    ///
    /// # Errors
    ///
    /// Returns the [`ContactError`] for the first field that fails.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::EmptyName);
        }
        let email = Email::parse(&self.email)?;
        let subject = if self.subject.trim().is_empty() {
            ContactSubject::default()
        } else {
            self.subject.parse()?
        };
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ContactError::EmptyMessage);
        }
        let phone = Some(self.phone.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        Ok(ContactMessage {
            name: name.to_owned(),
            email,
            phone,
            subject,
            message: message.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Grace Hopper".to_owned(),
            email: "Grace@Example.com".to_owned(),
            phone: String::new(),
            subject: "catering".to_owned(),
            message: "Do you cater weddings?".to_owned(),
        }
    }

    #[test]
    fn test_valid_form() {
        let message = form().validate().unwrap();
        assert_eq!(message.email.as_str(), "grace@example.com");
        assert_eq!(message.subject, ContactSubject::Catering);
        assert_eq!(message.phone, None);
    }

    #[test]
    fn test_blank_subject_is_general() {
        let mut f = form();
        f.subject = String::new();
        assert_eq!(f.validate().unwrap().subject, ContactSubject::General);
    }

    #[test]
    fn test_rejections() {
        let mut f = form();
        f.name = " ".to_owned();
        assert_eq!(f.validate(), Err(ContactError::EmptyName));

        let mut f = form();
        f.message = "\n".to_owned();
        assert_eq!(f.validate(), Err(ContactError::EmptyMessage));

        let mut f = form();
        f.subject = "spam".to_owned();
        assert!(matches!(f.validate(), Err(ContactError::InvalidSubject(_))));

        let mut f = form();
        f.email = "grace@".to_owned();
        assert!(matches!(f.validate(), Err(ContactError::InvalidEmail(_))));
    }

    #[test]
    fn test_subject_labels() {
        assert_eq!(ContactSubject::Catering.label(), "Catering & Events");
        for subject in ContactSubject::ALL {
            assert_eq!(subject.value().parse::<ContactSubject>().unwrap(), subject);
        }
    }
}
