// src/mailer.rs

use crate::config::SmtpSettings;
use crate::petfinder::Animal;
use crate::templates::listing_table;
use chrono::{DateTime, SecondsFormat, Utc};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use maud::html;
use std::time::Duration;
use thiserror::Error;

const PLAIN_FALLBACK: &str =
    "Your email client does not support HTML. Please open in an HTML-capable email client.";
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid address '{address}': {message}")]
    Address { address: String, message: String },

    #[error("No recipients configured")]
    NoRecipients,

    #[error("Could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A rendered digest email, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl DigestEmail {
    pub fn render(animals: &[Animal], run_at: DateTime<Utc>) -> Self {
        let subject = format!(
            "Dog Digest: {} matches in last 24h (run @ {})",
            animals.len(),
            run_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let html = html! { div { (listing_table(animals)) } }.into_string();

        Self {
            subject,
            html,
            text: PLAIN_FALLBACK.to_string(),
        }
    }
}

fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, MailerError> {
    let parsed = address.parse().map_err(|e: lettre::address::AddressError| {
        MailerError::Address {
            address: address.to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(Mailbox::new(name.map(str::to_string), parsed))
}

pub struct DigestMailer {
    from: Mailbox,
    recipients: Vec<Mailbox>,
    transport: SmtpTransport,
}

impl DigestMailer {
    /// STARTTLS relay with login credentials.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailerError> {
        if settings.recipients.is_empty() {
            return Err(MailerError::NoRecipients);
        }

        let from = mailbox(Some(&settings.sender_name), &settings.sender_email)?;
        let recipients = settings
            .recipients
            .iter()
            .map(|r| mailbox(None, r))
            .collect::<Result<Vec<_>, _>>()?;

        let transport = SmtpTransport::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.pass.clone(),
            ))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            from,
            recipients,
            transport,
        })
    }

    pub fn message(&self, email: &DigestEmail) -> Result<Message, MailerError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.as_str());
        for to in &self.recipients {
            builder = builder.to(to.clone());
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))?;
        Ok(message)
    }

    pub fn send(&self, email: &DigestEmail) -> Result<(), MailerError> {
        let message = self.message(email)?;
        self.transport.send(&message)?;
        Ok(())
    }
}
