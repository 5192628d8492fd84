use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{CertmailError, Result};

/// One addressee of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Generated certificate, set once the document exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<PathBuf>,
}

impl Recipient {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            attachment: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name used in greetings, or `fallback` when the recipient has none.
    pub fn display_name(&self, fallback: &str) -> String {
        let name = self.full_name();
        if name.trim().is_empty() {
            fallback.to_string()
        } else {
            name
        }
    }

    /// File name stem for the certificate: the full name without spaces.
    pub fn file_stem(&self) -> String {
        self.full_name().replace(' ', "")
    }
}

/// Reads recipients from a comma separated file.
///
/// The first row is always treated as a header and skipped. Every other row
/// must carry at least `first_name, last_name, email`; extra columns are
/// ignored.
pub fn load_recipients(path: impl AsRef<Path>) -> Result<Vec<Recipient>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    // The reader drops blank lines; a gap in line numbers is an empty row.
    let header = reader.headers()?;
    let mut next_line = header.position().map(|p| p.line()).unwrap_or(1) + lines_spanned(header);

    let mut recipients = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(next_line);
        if line > next_line {
            return Err(CertmailError::ShortRecipientRow {
                line: next_line,
                found: 0,
            });
        }
        next_line = line + lines_spanned(&record);

        if record.len() < 3 {
            return Err(CertmailError::ShortRecipientRow {
                line,
                found: record.len(),
            });
        }

        recipients.push(Recipient::new(&record[0], &record[1], &record[2]));
    }

    info!("Loaded {} recipients from {}", recipients.len(), path.display());
    Ok(recipients)
}

/// Number of lines a record occupies, counting newlines inside quoted fields.
fn lines_spanned(record: &csv::StringRecord) -> u64 {
    1 + record
        .iter()
        .map(|field| field.matches('\n').count() as u64)
        .sum::<u64>()
}

/// Writes the recipients and their generated documents as JSON.
pub fn write_manifest(recipients: &[Recipient], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(recipients)?;
    std::fs::write(path, json)?;
    debug!("Wrote manifest {}", path.display());
    Ok(())
}
