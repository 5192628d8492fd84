use std::time::Duration;

use lettre::transport::smtp::authentication::{Credentials, DEFAULT_MECHANISMS};
use lettre::transport::smtp::client::{SmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use lettre::Message;
use log::{debug, info, warn};

use crate::config::SmtpSettings;
use crate::error::{CertmailError, Result};

/// Port on which the server expects TLS from the first byte.
pub const IMPLICIT_TLS_PORT: u16 = 465;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// An open mail session.
pub trait MailTransport {
    fn login(&mut self, user: &str, password: &str) -> Result<()>;

    fn send(&mut self, message: &Message) -> Result<()>;

    /// Ends the session. Further calls fail with [`CertmailError::SessionClosed`].
    fn close(&mut self) -> Result<()>;
}

/// How the session reaches TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// The socket is wrapped in TLS before the server greeting.
    Implicit,
    /// Plain connection, EHLO, then STARTTLS and EHLO again.
    StartTls,
}

impl TlsMode {
    pub fn for_port(port: u16) -> Self {
        if port == IMPLICIT_TLS_PORT {
            TlsMode::Implicit
        } else {
            TlsMode::StartTls
        }
    }
}

/// Blocking SMTP session over TLS.
pub struct SmtpSession {
    connection: Option<SmtpConnection>,
}

impl SmtpSession {
    /// Connects and greets the server, choosing TLS from the port.
    pub fn connect(settings: &SmtpSettings) -> Result<Self> {
        Self::connect_with(settings, TlsMode::for_port(settings.port))
    }

    fn connect_with(settings: &SmtpSettings, mode: TlsMode) -> Result<Self> {
        let hello = ClientId::default();
        let tls = TlsParameters::new(settings.host.clone())?;
        let address = (settings.host.as_str(), settings.port);

        debug!("Connecting to {}:{} with {:?}", settings.host, settings.port, mode);
        let connection = match mode {
            TlsMode::Implicit => {
                SmtpConnection::connect(address, Some(CONNECT_TIMEOUT), &hello, Some(&tls), None)?
            }
            TlsMode::StartTls => {
                let mut connection =
                    SmtpConnection::connect(address, Some(CONNECT_TIMEOUT), &hello, None, None)?;
                connection.starttls(&tls, &hello)?;
                connection
            }
        };

        info!("Connected to mail server {}:{}", settings.host, settings.port);
        Ok(Self {
            connection: Some(connection),
        })
    }

    fn connection(&mut self) -> Result<&mut SmtpConnection> {
        self.connection.as_mut().ok_or(CertmailError::SessionClosed)
    }
}

impl MailTransport for SmtpSession {
    fn login(&mut self, user: &str, password: &str) -> Result<()> {
        let credentials = Credentials::new(user.to_string(), password.to_string());
        self.connection()?.auth(DEFAULT_MECHANISMS, &credentials)?;
        Ok(())
    }

    fn send(&mut self, message: &Message) -> Result<()> {
        let response = self
            .connection()?
            .send(message.envelope(), &message.formatted())?;
        debug!("Server accepted message: {:?}", response.code());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        match self.connection.take() {
            Some(mut connection) => {
                connection.quit()?;
                Ok(())
            }
            None => Err(CertmailError::SessionClosed),
        }
    }
}

impl Drop for SmtpSession {
    fn drop(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            warn!("Mail session dropped while open, aborting connection");
            connection.abort();
        }
    }
}
