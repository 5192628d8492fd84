//! # certmail
//!
//! A library and CLI tool that generates a certificate per recipient and
//! mails it to them over an authenticated SMTP session.

pub mod certificate;
pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod mail;
pub mod recipient;
pub mod retry;
pub mod template;

// Re-exports
pub use certificate::{CertificateGenerator, DrawnCertificate, MarkupCertificate};
pub use cli::{Cli, Commands};
pub use config::{Config, SmtpSettings};
pub use error::{CertmailError, Result};
pub use recipient::Recipient;
pub use template::{PlaceholderReplacer, Template};
