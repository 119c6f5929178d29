//! Contact form: validation, submission state and delivery transports.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ContactError, TransportError};

pub const STUDIO_NAME: &str = "Third Space Interactive";
pub const STUDIO_INBOX: &str = "thirdspaceinteractive@gmail.com";

pub const SENT_NOTICE: &str = "Thank you. We will get back to you as soon as possible";
pub const FAILED_NOTICE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
            Self::Message => f.write_str("message"),
        }
    }
}

/// What goes over the wire, addressed to the studio inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub from_name: String,
    pub from_email: String,
    pub to_name: String,
    pub to_email: String,
    pub message: String,
}

/// Outcome shown to the visitor after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactNotice {
    Sent,
    Failed,
}

impl ContactNotice {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Sent => SENT_NOTICE,
            Self::Failed => FAILED_NOTICE,
        }
    }
}

impl fmt::Display for ContactNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Form fields plus the in-flight flag that disables the submit control.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    #[cfg(any(test, feature = "ui"))]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Checks required fields in display order, then the email shape.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        for field in ContactField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        let email = self.email.trim();
        if !looks_like_email(email) {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }

        Ok(ContactMessage {
            from_name: self.name.trim().to_string(),
            from_email: email.to_string(),
            to_name: STUDIO_NAME.to_string(),
            to_email: STUDIO_INBOX.to_string(),
            message: self.message.trim().to_string(),
        })
    }

    /// Validates and marks the form in flight.
    pub fn begin_submit(&mut self) -> Result<ContactMessage, ContactError> {
        if self.submitting {
            return Err(ContactError::Busy);
        }
        let message = self.validate()?;
        self.submitting = true;
        Ok(message)
    }

    /// Applies a delivery outcome. The form is cleared only on success so a
    /// failed message can be retried as typed.
    pub fn finish_submit(&mut self, outcome: &Result<(), TransportError>) -> ContactNotice {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.clear();
                ContactNotice::Sent
            }
            Err(e) => {
                warn!("Contact delivery failed: {}", e);
                ContactNotice::Failed
            }
        }
    }
}

/// `local@domain`, both halves non-empty, no whitespace.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError>;
}

/// Validates, delivers and settles the form in one step.
pub async fn submit<T>(form: &mut ContactForm, transport: &T) -> Result<ContactNotice, ContactError>
where
    T: MailTransport + ?Sized,
{
    let message = form.begin_submit()?;
    let outcome = transport.deliver(&message).await;
    Ok(form.finish_submit(&outcome))
}

/// Queues messages as JSON files in a local directory.
#[derive(Debug)]
pub struct OutboxTransport {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_file_name(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{millis}-{seq:04}.json")
    }
}

#[async_trait]
impl MailTransport for OutboxTransport {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let body = serde_json::to_vec_pretty(message)?;
        let path = self.dir.join(self.next_file_name());
        tokio::fs::write(&path, body).await?;
        info!(?path, from = %message.from_email, "Queued contact message");
        Ok(())
    }
}
