use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertmailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration file must end in .ini: {0}")]
    InvalidConfigFile(String),

    #[error("Missing configuration key '{0}'")]
    MissingConfigKey(String),

    #[error("Invalid SMTP port '{0}'")]
    InvalidPort(String),

    #[error("Recipient row {line} has {found} field(s), expected first_name, last_name, email")]
    ShortRecipientRow { line: u64, found: usize },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Markup compiler '{compiler}' failed for {} ({status})", .source_file.display())]
    CompilerFailed {
        compiler: String,
        source_file: PathBuf,
        status: ExitStatus,
    },

    #[error("Markup compiler produced no document at {}", .0.display())]
    CompilerOutputMissing(PathBuf),

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Invalid content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Could not read password: {0}")]
    PasswordPrompt(std::io::Error),

    #[error("Login failed after {attempts} attempt(s): {source}")]
    AuthenticationFailed {
        attempts: u32,
        #[source]
        source: Box<CertmailError>,
    },

    #[error("No certificate attached for recipient {0}")]
    MissingAttachment(String),

    #[error("An output folder (--out) is required when compiling markup certificates")]
    OutputFolderRequired,

    #[error("Mail session is already closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, CertmailError>;
