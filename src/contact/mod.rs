mod form;

pub use self::form::{is_valid_email, ContactForm, ValidationErrors};
use crate::config::MailConfig;
use crate::database::{ContactMessage, NewContactMessage};
use crate::mailer::{Email, Mailer};
use chrono::Utc;
use core::fmt;
use log::{Level, Log, Record};
use std::error::Error;

/// Persistent storage for contact messages
pub trait MessageStore {
    fn insert(&self, message: NewContactMessage) -> anyhow::Result<ContactMessage>;
}

#[derive(Debug)]
pub enum SubmitError {
    /// The submission was rejected and nothing was saved
    Invalid(ValidationErrors),
    /// The message could not be saved
    Storage(anyhow::Error),
    /// The message was saved, but the site owner could not be notified
    Notification(anyhow::Error),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "Invalid contact form: {errors}"),
            Self::Storage(err) => write!(f, "Failed to save contact message: {err:#}"),
            Self::Notification(err) => {
                write!(f, "Failed to send contact notification email: {err:#}")
            }
        }
    }
}

impl Error for SubmitError {}

/// Accepts contact form submissions on behalf of the site owner
pub struct ContactIntake<'a> {
    store: &'a dyn MessageStore,
    mailer: &'a dyn Mailer,
    logger: &'a dyn Log,
    addresses: &'a MailConfig,
}

impl<'a> ContactIntake<'a> {
    pub fn new(
        store: &'a dyn MessageStore,
        mailer: &'a dyn Mailer,
        logger: &'a dyn Log,
        addresses: &'a MailConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            logger,
            addresses,
        }
    }

    /// Validate and save a submission, then notify the site owner and acknowledge the sender
    ///
    /// A failure to notify the site owner is returned even though the message has already been
    /// saved at that point. A failure to acknowledge the sender is only logged.
    pub fn submit(&self, form: ContactForm) -> Result<ContactMessage, SubmitError> {
        let form = form.clean().map_err(SubmitError::Invalid)?;
        let message = self
            .store
            .insert(NewContactMessage {
                name: form.name,
                email: form.email,
                subject: form.subject,
                message: form.message,
                created_at: Utc::now().naive_utc(),
            })
            .map_err(SubmitError::Storage)?;

        self.mailer
            .send(&self.notification(&message))
            .map_err(SubmitError::Notification)?;

        if let Err(err) = self.mailer.send(&self.acknowledgment(&message)) {
            self.logger.log(
                &Record::builder()
                    .level(Level::Error)
                    .target(module_path!())
                    .module_path(Some(module_path!()))
                    .file(Some(file!()))
                    .line(Some(line!()))
                    .args(format_args!(
                        "Failed to send acknowledgment email to {}\n{err:?}",
                        message.email
                    ))
                    .build(),
            );
        }

        Ok(message)
    }

    // The email that tells the site owner about a new message
    fn notification(&self, message: &ContactMessage) -> Email {
        Email {
            subject: format!("Portfolio Contact: {}", message.subject),
            body: format!(
                "From: {}\nEmail: {}\n\n{}",
                message.name, message.email, message.message
            ),
            from: self.addresses.from.clone(),
            to: vec![self.addresses.contact.clone()],
        }
    }

    // The email that confirms receipt to the sender
    fn acknowledgment(&self, message: &ContactMessage) -> Email {
        Email {
            subject: format!("Thank you for contacting me - {}", message.subject),
            body: format!(
                "Hi {},\n\nI received your message. I'll get back to you shortly.",
                message.name
            ),
            from: self.addresses.from.clone(),
            to: vec![message.email.clone()],
        }
    }
}
