use std::path::{Path, PathBuf};

use log::debug;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use super::CertificateGenerator;
use crate::config::Config;
use crate::error::{CertmailError, Result};
use crate::recipient::Recipient;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
/// Horizontal padding inside a cell.
const CELL_PADDING_MM: f32 = 1.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Event and signer details printed on every certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDetails {
    pub event: String,
    pub location: String,
    pub date: String,
    pub signing_name: String,
    pub signing_title: String,
    /// Read but not drawn yet.
    pub logo: Option<PathBuf>,
    /// Read but not drawn yet.
    pub signature: Option<PathBuf>,
}

impl CertificateDetails {
    /// Reads the certificate keys. `DATE` defaults to today.
    pub fn from_config(config: &Config) -> Result<Self> {
        let date = match config.get("DATE") {
            Some(date) => date.to_string(),
            None => chrono::Local::now().format("%B %d, %Y").to_string(),
        };

        Ok(Self {
            event: config.require("EVENT")?.to_string(),
            location: config.require("LOCATION")?.to_string(),
            date,
            signing_name: config.require("SIGNING_NAME")?.to_string(),
            signing_title: config.require("SIGNING_TITLE")?.to_string(),
            logo: config.get("LOGO").map(PathBuf::from),
            signature: config.get("SIGNATURE").map(PathBuf::from),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// One text row of the page, stacked top to bottom.
#[derive(Debug, Clone, PartialEq)]
struct Cell {
    width: f32,
    height: f32,
    text: String,
    size: f32,
    bold: bool,
    align: Align,
}

impl Cell {
    fn new(width: f32, height: f32, text: impl Into<String>, size: f32) -> Self {
        Self {
            width,
            height,
            text: text.into(),
            size,
            bold: false,
            align: Align::Left,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// Rough Helvetica advance width. The built-in fonts carry no metrics.
fn approx_text_width_mm(text: &str, size: f32, bold: bool) -> f32 {
    let em = size * PT_TO_MM;
    let factor = if bold { 0.58 } else { 0.52 };
    text.chars().count() as f32 * em * factor
}

/// Single-page A4 certificate drawn with the PDF base fonts.
pub struct DrawnCertificate {
    details: CertificateDetails,
}

impl DrawnCertificate {
    pub fn new(details: CertificateDetails) -> Self {
        if details.logo.is_some() || details.signature.is_some() {
            debug!("Logo and signature images are not placed on drawn certificates");
        }
        Self { details }
    }

    fn cells(&self, name: &str) -> Vec<Cell> {
        let d = &self.details;
        vec![
            Cell::new(200.0, 30.0, d.event.as_str(), 25.0).bold(),
            Cell::new(200.0, 10.0, "We hereby certify that", 20.0),
            Cell::new(160.0, 30.0, name, 20.0).bold().centered(),
            Cell::new(200.0, 10.0, format!("has attended the {}", d.event), 20.0),
            Cell::new(200.0, 10.0, format!("organized in {} on {}.", d.location, d.date), 20.0),
            Cell::new(200.0, 50.0, "On behalf of the organizing committee,", 20.0),
            Cell::new(200.0, 40.0, "", 20.0),
            Cell::new(200.0, 10.0, d.signing_name.as_str(), 20.0),
            Cell::new(200.0, 10.0, d.signing_title.as_str(), 20.0),
        ]
    }

    /// Renders the certificate for `name` to PDF bytes.
    pub fn render(&self, name: &str) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            format!("{} certificate", self.details.event),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Certificate",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CertmailError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CertmailError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut top = MARGIN_MM;
        for cell in self.cells(name) {
            if !cell.text.is_empty() {
                let font: &IndirectFontRef = if cell.bold { &bold } else { &regular };
                let x = match cell.align {
                    Align::Left => MARGIN_MM + CELL_PADDING_MM,
                    Align::Center => {
                        let width = approx_text_width_mm(&cell.text, cell.size, cell.bold);
                        MARGIN_MM + ((cell.width - width) / 2.0).max(CELL_PADDING_MM)
                    }
                };
                // Baseline sits slightly below the vertical middle of the cell.
                let baseline = top + cell.height / 2.0 + 0.3 * cell.size * PT_TO_MM;
                layer.use_text(
                    cell.text.as_str(),
                    cell.size,
                    Mm(x),
                    Mm(PAGE_HEIGHT_MM - baseline),
                    font,
                );
            }
            top += cell.height;
        }

        doc.save_to_bytes()
            .map_err(|e| CertmailError::Pdf(e.to_string()))
    }
}

impl CertificateGenerator for DrawnCertificate {
    fn extension(&self) -> &str {
        "pdf"
    }

    fn generate(&self, recipient: &Recipient, output: &Path) -> Result<()> {
        let bytes = self.render(&recipient.full_name())?;
        std::fs::write(output, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CertificateDetails {
        CertificateDetails {
            event: "Student Symposium".to_string(),
            location: "Brussels".to_string(),
            date: "May 4, 2024".to_string(),
            signing_name: "Jo Smith".to_string(),
            signing_title: "Chair".to_string(),
            logo: None,
            signature: None,
        }
    }

    #[test]
    fn test_details_from_config() {
        let config = Config::parse(
            "EVENT = Symposium\nLOCATION = Ghent\nDATE = 1 May\n\
             SIGNING_NAME = Jo\nSIGNING_TITLE = Chair\nLOGO = logo.png\n",
        );
        let d = CertificateDetails::from_config(&config).unwrap();
        assert_eq!(d.event, "Symposium");
        assert_eq!(d.date, "1 May");
        assert_eq!(d.logo, Some(PathBuf::from("logo.png")));
        assert_eq!(d.signature, None);
    }

    #[test]
    fn test_date_defaults_to_today() {
        let config = Config::parse(
            "EVENT = Symposium\nLOCATION = Ghent\nSIGNING_NAME = Jo\nSIGNING_TITLE = Chair\n",
        );
        let d = CertificateDetails::from_config(&config).unwrap();
        assert!(!d.date.is_empty());
    }

    #[test]
    fn test_missing_event_is_an_error() {
        let config = Config::parse("LOCATION = Ghent\n");
        assert!(matches!(
            CertificateDetails::from_config(&config),
            Err(CertmailError::MissingConfigKey(k)) if k == "EVENT"
        ));
    }

    #[test]
    fn test_layout_blocks() {
        let cert = DrawnCertificate::new(details());
        let cells = cert.cells("Ann Lee");

        let texts: Vec<&str> = cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts[0], "Student Symposium");
        assert_eq!(texts[2], "Ann Lee");
        assert_eq!(texts[3], "has attended the Student Symposium");
        assert_eq!(texts[4], "organized in Brussels on May 4, 2024.");
        assert_eq!(texts[7], "Jo Smith");
        assert_eq!(texts[8], "Chair");

        assert!(cells[2].bold);
        assert_eq!(cells[2].align, Align::Center);

        let total: f32 = cells.iter().map(|c| c.height).sum();
        assert!(MARGIN_MM + total <= PAGE_HEIGHT_MM);
    }

    #[test]
    fn test_render_pdf() {
        let cert = DrawnCertificate::new(details());
        let bytes = cert.render("Ann Lee").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AnnLee.pdf");
        let cert = DrawnCertificate::new(details());

        cert.generate(&Recipient::new("Ann", "Lee", "ann@x.com"), &path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
