//! Mail transport contract and SMTP implementation.
//!
//! # Invariants
//! - Send failures are returned to the caller, never swallowed.
//! - The sender address is the configured SMTP user.

use crate::config::MailerConfig;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{Message, SmtpTransport, Transport};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const IMPLICIT_TLS_PORT: u16 = 465;

/// Plain-text mail handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Server acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailReceipt {
    /// SMTP reply code, e.g. `250`.
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// Sender or recipient address cannot be parsed.
    InvalidAddress(String),
    /// Message could not be assembled.
    Build(String),
    /// SMTP connection, auth or delivery failure.
    Transport(String),
}

impl Display for MailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress(value) => write!(f, "invalid mail address: {value}"),
            Self::Build(message) => write!(f, "failed to build mail: {message}"),
            Self::Transport(message) => write!(f, "mail transport failed: {message}"),
        }
    }
}

impl Error for MailError {}

/// Outgoing mail collaborator.
pub trait Mailer: Send + Sync {
    fn send(&self, message: &MailMessage) -> Result<MailReceipt, MailError>;
}

/// SMTP mailer. Port 465 uses implicit TLS, other ports use STARTTLS.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &MailerConfig) -> Result<Self, MailError> {
        let from = config
            .user
            .parse::<Mailbox>()
            .map_err(|err| MailError::InvalidAddress(format!("{}: {err}", config.user)))?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            SmtpTransport::relay(&config.host)
        } else {
            SmtpTransport::starttls_relay(&config.host)
        }
        .map_err(|err| MailError::Transport(err.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &MailMessage) -> Result<MailReceipt, MailError> {
        let started_at = Instant::now();
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|err| MailError::InvalidAddress(format!("{}: {err}", message.to)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.text.clone())
            .map_err(|err| MailError::Build(err.to_string()))?;

        match self.transport.send(&email) {
            Ok(response) => {
                let receipt = receipt_from(&response);
                info!(
                    "event=mail_send module=notify status=ok duration_ms={} smtp_code={}",
                    started_at.elapsed().as_millis(),
                    receipt.code
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(
                    "event=mail_send module=notify status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(MailError::Transport(err.to_string()))
            }
        }
    }
}

fn receipt_from(response: &Response) -> MailReceipt {
    MailReceipt {
        code: response.code().to_string(),
        message: response.message().collect::<Vec<_>>().join(" "),
    }
}
