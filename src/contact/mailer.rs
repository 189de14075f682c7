use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, Address, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SmtpConfig;

/// Why a dispatch failed. The HTTP boundary collapses all of these to a
/// bare fail flag.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport is not configured")]
    Disabled,
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not compose message: {0}")]
    Compose(#[from] lettre::error::Error),
    #[error("smtp dispatch failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound mail capability, injected into handlers through `AppState`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact(&self, name: &str, email: &str, message: &str) -> Result<(), MailError>;
}

/// SMTP relay client, a process-lifetime singleton built at startup.
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    sender: String,
    recipient: String,
}

pub(crate) fn contact_body(name: &str, email: &str, message: &str) -> String {
    format!("name: {name} \n email: {email} \n message: {message}")
}

impl SmtpMailer {
    pub fn from_config(cfg: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = match (&cfg.username, &cfg.password) {
            (Some(user), Some(pass)) => Some(
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?
                    .port(cfg.port)
                    .credentials(Credentials::new(user.clone(), pass.clone()))
                    .build(),
            ),
            _ => {
                warn!("SMTP credentials not set; contact mail dispatch disabled");
                None
            }
        };
        Ok(Self {
            transport,
            sender: cfg.username.clone().unwrap_or_else(|| cfg.recipient.clone()),
            recipient: cfg.recipient.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_contact(&self, name: &str, email: &str, message: &str) -> Result<(), MailError> {
        let transport = self.transport.as_ref().ok_or(MailError::Disabled)?;

        // The submitter's name fronts the relay account address;
        // replies go to the address they typed in.
        let from = Mailbox::new(Some(name.to_string()), self.sender.parse::<Address>()?);
        let mail = Message::builder()
            .from(from)
            .reply_to(email.parse::<Mailbox>()?)
            .to(self.recipient.parse::<Mailbox>()?)
            .subject("New Message from Contact Form")
            .body(contact_body(name, email, message))?;

        transport.send(mail).await?;
        debug!(to = %self.recipient, "contact mail handed to relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".into(),
            port: 587,
            username: None,
            password: None,
            recipient: "owner@example.com".into(),
        }
    }

    #[test]
    fn body_carries_all_three_fields() {
        let body = contact_body("Ann", "a@x.com", "I would like a consultation");
        assert!(body.contains("name: Ann"));
        assert!(body.contains("email: a@x.com"));
        assert!(body.contains("message: I would like a consultation"));
    }

    #[tokio::test]
    async fn dispatch_without_credentials_fails_fast() {
        let mailer = SmtpMailer::from_config(&unconfigured()).expect("mailer should build");
        let err = mailer
            .send_contact("Ann", "a@x.com", "hello there")
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::Disabled));
    }
}
