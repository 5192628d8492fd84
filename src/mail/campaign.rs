use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::config::Config;
use crate::error::{CertmailError, Result};
use crate::recipient::Recipient;
use crate::template::Template;

/// File name every recipient sees for their certificate.
pub const ATTACHMENT_NAME: &str = "certificate.pdf";

/// Everything shared by the messages of one batch.
#[derive(Debug, Clone)]
pub struct Campaign {
    subject: String,
    sender: Mailbox,
    html: Template,
    plain: Option<Template>,
    fallback_name: String,
}

impl Campaign {
    pub fn new(
        subject: impl Into<String>,
        sender: Mailbox,
        html: Template,
        plain: Option<Template>,
        fallback_name: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            sender,
            html,
            plain,
            fallback_name: fallback_name.into(),
        }
    }

    /// Reads `SUBJECT`, `SENDER` and the greeting fallback from `config`.
    pub fn from_config(config: &Config, html: Template, plain: Option<Template>) -> Result<Self> {
        let sender: Mailbox = config.require("SENDER")?.parse()?;
        Ok(Self::new(
            config.require("SUBJECT")?,
            sender,
            html,
            plain,
            config.greeting_fallback(),
        ))
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    fn body(&self, name: &str) -> MultiPart {
        let html = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(self.html.render(name));

        match &self.plain {
            Some(plain) => MultiPart::mixed().multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(plain.render(name)),
                    )
                    .singlepart(html),
            ),
            None => MultiPart::mixed().singlepart(html),
        }
    }

    /// Builds the message for one recipient with their certificate attached.
    pub fn compose(&self, recipient: &Recipient) -> Result<Message> {
        let attachment = recipient
            .attachment
            .as_ref()
            .ok_or_else(|| CertmailError::MissingAttachment(recipient.email.clone()))?;
        let document = std::fs::read(attachment)?;

        let to: Mailbox = recipient.email.parse()?;
        let name = recipient.display_name(&self.fallback_name);
        let body = self.body(&name).singlepart(
            Attachment::new(ATTACHMENT_NAME.to_string())
                .body(document, ContentType::parse("application/pdf")?),
        );

        let message = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(self.subject.as_str())
            .multipart(body)?;
        Ok(message)
    }
}
