use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use super::CertificateGenerator;
use crate::error::{CertmailError, Result};
use crate::recipient::Recipient;
use crate::template::Template;

pub const DEFAULT_COMPILER: &str = "pdflatex";

/// Fills a markup template per recipient and compiles it to PDF with an
/// external program.
///
/// The compiler runs inside the output folder, so its auxiliary files and
/// logs land next to the documents.
pub struct MarkupCertificate {
    template: Template,
    compiler: PathBuf,
}

impl MarkupCertificate {
    pub fn new(template: Template, compiler: impl AsRef<str>) -> Self {
        Self {
            template,
            compiler: resolve_program(compiler.as_ref()),
        }
    }
}

/// Anchors a relative program path such as `tools/latex` to the current
/// directory. Bare names are left for `PATH` lookup.
fn resolve_program(program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_absolute() || path.components().count() < 2 {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

impl CertificateGenerator for MarkupCertificate {
    fn extension(&self) -> &str {
        "pdf"
    }

    fn generate(&self, recipient: &Recipient, output: &Path) -> Result<()> {
        let dir = match output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let source_name = output.with_extension("tex");
        let source_name = source_name
            .file_name()
            .ok_or_else(|| CertmailError::CompilerOutputMissing(output.to_path_buf()))?;
        let source = dir.join(source_name);

        std::fs::write(&source, self.template.render(&recipient.full_name()))?;
        debug!("Wrote markup source {}", source.display());

        let result = Command::new(&self.compiler)
            .arg("-interaction=nonstopmode")
            .arg(source_name)
            .current_dir(dir)
            .output()?;

        debug!(
            "{} output for {}:\n{}",
            self.compiler.display(),
            source.display(),
            String::from_utf8_lossy(&result.stdout)
        );

        if !result.status.success() {
            return Err(CertmailError::CompilerFailed {
                compiler: self.compiler.display().to_string(),
                source_file: source,
                status: result.status,
            });
        }

        if !output.is_file() {
            return Err(CertmailError::CompilerOutputMissing(output.to_path_buf()));
        }

        info!("Compiled {}", output.display());
        Ok(())
    }
}
