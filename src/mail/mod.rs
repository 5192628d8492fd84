//! Composing and delivering certificate mails.
//!
//! A run goes through one session: connect, authenticate, then compose and
//! send a message per recipient, then close.

pub mod auth;
pub mod campaign;
pub mod eml;
pub mod sender;
pub mod transport;

pub use auth::{authenticate, PasswordPrompt, TerminalPrompt, LOGIN_ATTEMPTS};
pub use campaign::{Campaign, ATTACHMENT_NAME};
pub use eml::write_eml;
pub use sender::{deliver, send_all, DeliveryOptions, DEFAULT_PAUSE};
pub use transport::{MailTransport, SmtpSession, TlsMode, IMPLICIT_TLS_PORT};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use lettre::Message;

    use super::{MailTransport, PasswordPrompt};
    use crate::error::{CertmailError, Result};

    pub struct SentMessage {
        pub to: Vec<String>,
        pub raw: String,
    }

    /// In-memory transport that rejects the first `failing_logins` logins.
    pub struct RecordingTransport {
        failing_logins: usize,
        pub fail_send_to: Option<String>,
        pub logins: Vec<(String, String)>,
        pub sent: Vec<SentMessage>,
        pub closed: bool,
    }

    impl RecordingTransport {
        pub fn new(failing_logins: usize) -> Self {
            Self {
                failing_logins,
                fail_send_to: None,
                logins: Vec::new(),
                sent: Vec::new(),
                closed: false,
            }
        }
    }

    impl MailTransport for RecordingTransport {
        fn login(&mut self, user: &str, password: &str) -> Result<()> {
            self.logins.push((user.to_string(), password.to_string()));
            if self.logins.len() <= self.failing_logins {
                return Err(CertmailError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "535 authentication failed",
                )));
            }
            Ok(())
        }

        fn send(&mut self, message: &Message) -> Result<()> {
            let to: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
            if self.fail_send_to.as_ref().is_some_and(|addr| to.contains(addr)) {
                return Err(CertmailError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset",
                )));
            }
            self.sent.push(SentMessage {
                to,
                raw: String::from_utf8_lossy(&message.formatted()).to_string(),
            });
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            if self.closed {
                return Err(CertmailError::SessionClosed);
            }
            self.closed = true;
            Ok(())
        }
    }

    /// Answers password prompts from a fixed list.
    pub struct ScriptedPrompt {
        answers: VecDeque<String>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
            }
        }
    }

    impl PasswordPrompt for ScriptedPrompt {
        fn read_password(&mut self) -> std::io::Result<String> {
            self.answers
                .pop_front()
                .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
        }
    }
}
