use std::fs;
use std::io::Write;
use std::path::Path;

use lettre::Message;
use log::debug;

use crate::error::Result;

/// Writes the message as an `.eml` file, exactly as it would be sent.
pub fn write_eml(message: &Message, output_eml_path: &Path) -> Result<()> {
    let mut f = fs::File::create(output_eml_path)?;
    f.write_all(&message.formatted())?;
    f.flush()?;

    debug!("Wrote {}", output_eml_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::message::header::ContentType;

    #[test]
    fn test_write_eml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AnnLee.eml");
        let message = Message::builder()
            .from("a@example.com".parse().unwrap())
            .to("ann@x.com".parse().unwrap())
            .subject("Hi")
            .header(ContentType::TEXT_PLAIN)
            .body(String::from("Dear Ann Lee,"))
            .unwrap();

        write_eml(&message, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("To: ann@x.com\r\n"));
        assert!(raw.contains("Subject: Hi\r\n"));
        assert!(raw.contains("\r\n\r\nDear Ann Lee,"));
    }
}
