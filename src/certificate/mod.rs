//! Per-recipient certificate documents.
//!
//! Two generators share one contract: given a recipient, write exactly one
//! document to a path derived from the recipient's name. [`DrawnCertificate`]
//! lays the page out directly; [`MarkupCertificate`] fills a markup template
//! and hands it to an external compiler.

pub mod drawn;
pub mod markup;

pub use drawn::{CertificateDetails, DrawnCertificate};
pub use markup::MarkupCertificate;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Result;
use crate::recipient::Recipient;

pub trait CertificateGenerator {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &str;

    /// Writes the certificate for `recipient` to `output`.
    ///
    /// Returns an error if no document was produced.
    fn generate(&self, recipient: &Recipient, output: &Path) -> Result<()>;
}

/// `<out_dir>/<FirstLast>.<ext>`
pub fn output_path(out_dir: &Path, recipient: &Recipient, extension: &str) -> PathBuf {
    out_dir.join(format!("{}.{}", recipient.file_stem(), extension))
}

/// Recipients whose certificate file names collide, as (earlier, later) email pairs.
pub fn find_collisions(recipients: &[Recipient]) -> Vec<(String, String)> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut collisions = Vec::new();

    for recipient in recipients {
        let stem = recipient.file_stem();
        match seen.get(&stem) {
            Some(first) => collisions.push((first.to_string(), recipient.email.clone())),
            None => {
                seen.insert(stem, &recipient.email);
            }
        }
    }

    collisions
}

/// Generates one certificate per recipient in order and records its path.
///
/// Colliding file names are reported and the later document overwrites the
/// earlier one. Returns the number of documents written.
pub fn generate_all<G>(generator: &G, recipients: &mut [Recipient], out_dir: &Path) -> Result<usize>
where
    G: CertificateGenerator + ?Sized,
{
    std::fs::create_dir_all(out_dir)?;

    for (first, second) in find_collisions(recipients) {
        warn!(
            "Certificates for {} and {} share a file name; the later one overwrites the earlier",
            first, second
        );
    }

    let mut created = 0usize;
    for recipient in recipients.iter_mut() {
        let path = output_path(out_dir, recipient, generator.extension());
        generator.generate(recipient, &path)?;

        info!("Certificate for {} written to {}", recipient.email, path.display());
        println!("Created .{} file {}", generator.extension(), path.display());
        recipient.attachment = Some(path);
        created += 1;
    }

    Ok(created)
}
