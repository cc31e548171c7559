use crate::config::{MailConfig, Transport};
use anyhow::{bail, Context, Result};
use chrono::Local;
use log::info;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Email {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

impl Email {
    // Format the email as an RFC 5322 message
    fn to_message(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Transfer-Encoding: 8bit\r\n\r\n{}\r\n",
            header_value(&self.from),
            header_value(&self.to.join(", ")),
            header_value(&self.subject),
            Local::now().to_rfc2822(),
            self.body.replace("\r\n", "\n").replace('\n', "\r\n"),
        )
    }
}

// Line breaks in a header value would let the value inject extra headers
fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Something that can deliver emails
pub trait Mailer: Send + Sync {
    fn send(&self, email: &Email) -> Result<()>;
}

/// Writes emails to the log instead of delivering them
pub struct ConsoleMailer;

impl Mailer for ConsoleMailer {
    fn send(&self, email: &Email) -> Result<()> {
        info!(
            "Email from {} to {}\nSubject: {}\n\n{}",
            email.from,
            email.to.join(", "),
            email.subject,
            email.body
        );
        Ok(())
    }
}

/// Delivers emails by piping them to a sendmail-compatible program
pub struct SendmailMailer {
    program: PathBuf,
}

impl SendmailMailer {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Mailer for SendmailMailer {
    fn send(&self, email: &Email) -> Result<()> {
        if email.to.is_empty() {
            bail!("Email \"{}\" has no recipients", email.subject);
        }

        let mut process = Command::new(&self.program)
            .args(["-i", "--"])
            .args(&email.to)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        let mut stdin = process
            .stdin
            .take()
            .context("Failed to open sendmail stdin")?;
        // A program that exits without reading the whole message is judged by its exit status instead
        if let Err(err) = stdin.write_all(email.to_message().as_bytes()) {
            if err.kind() != ErrorKind::BrokenPipe {
                return Err(err).context("Failed to write email to sendmail");
            }
        }
        drop(stdin);

        let output = process
            .wait_with_output()
            .context("Failed to wait for sendmail")?;
        if !output.status.success() {
            bail!(
                "{} failed with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

/// Create the mailer selected by the configuration
pub fn from_config(config: &MailConfig) -> Box<dyn Mailer> {
    match config.transport {
        Transport::Console => Box::new(ConsoleMailer),
        Transport::Sendmail => Box::new(SendmailMailer::new(config.sendmail.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(subject: &str) -> Email {
        Email {
            subject: subject.to_owned(),
            body: "Line one\nLine two".to_owned(),
            from: "site@example.com".to_owned(),
            to: vec!["owner@example.com".to_owned(), "other@example.com".to_owned()],
        }
    }

    #[test]
    fn test_message_headers() {
        let message = email("Hello").to_message();
        assert!(message.starts_with(
            "From: site@example.com\r\nTo: owner@example.com, other@example.com\r\nSubject: Hello\r\n"
        ));
        assert!(message.ends_with("\r\n\r\nLine one\r\nLine two\r\n"));
    }

    #[test]
    fn test_header_injection() {
        let message = email("Hi\r\nBcc: victim@example.com").to_message();
        assert!(message.contains("Subject: Hi  Bcc: victim@example.com\r\n"));
        assert!(!message.contains("\r\nBcc:"));
    }

    #[test]
    fn test_console() -> Result<()> {
        ConsoleMailer.send(&email("Hello"))
    }

    #[cfg(unix)]
    #[test]
    fn test_sendmail_success() -> Result<()> {
        SendmailMailer::new(PathBuf::from("true")).send(&email("Hello"))
    }

    #[cfg(unix)]
    #[test]
    fn test_sendmail_failure() {
        assert!(SendmailMailer::new(PathBuf::from("false"))
            .send(&email("Hello"))
            .is_err());
        assert!(SendmailMailer::new(PathBuf::from("/nonexistent/sendmail"))
            .send(&email("Hello"))
            .is_err());
    }

    #[test]
    fn test_no_recipients() {
        let mut email = email("Hello");
        email.to.clear();
        assert!(SendmailMailer::new(PathBuf::from("true"))
            .send(&email)
            .is_err());
    }
}
