//! Starter input files for a new batch.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

pub const EXAMPLE_CONFIG: &str = "\
# SMTP server. Port 465 uses implicit TLS, any other port STARTTLS.
HOST = smtp.example.com
PORT = 587
LOGIN = organizer@example.com
SENDER = organizer@example.com
SUBJECT = Your certificate of attendance

# Printed on the certificate
EVENT = Student Symposium
LOCATION = Brussels
DATE = May 4, 2024
SIGNING_NAME = Jo Smith
SIGNING_TITLE = Chair of the organizing committee
LOGO = logo.png
SIGNATURE = signature.png

# Greeting used when a recipient has no name
FIRST_LASTNAME = Sir or Madam
";

pub const EXAMPLE_RECIPIENTS: &str = "\
first_name,last_name,email
Ann,Lee,ann@example.com
Bob,Ray,bob@example.com
";

pub const EXAMPLE_HTML: &str = "\
<html>
  <body>
    <p>Dear {{FIRST_LASTNAME}},</p>
    <p>Thank you for attending. Your certificate of attendance is attached.</p>
    <p>Kind regards,<br>The organizing committee</p>
  </body>
</html>
";

pub const EXAMPLE_TEXT: &str = "\
Dear {{FIRST_LASTNAME}},

Thank you for attending. Your certificate of attendance is attached.

Kind regards,
The organizing committee
";

pub const EXAMPLE_MARKUP: &str = r"\documentclass[a4paper,12pt]{article}
\usepackage[margin=2cm]{geometry}
\pagestyle{empty}
\begin{document}
\begin{center}
{\Huge\bfseries Student Symposium}\\[2cm]
{\Large We hereby certify that}\\[1cm]
{\LARGE\bfseries @@FIRST_LASTNAME@@}\\[1cm]
{\Large has attended the Student Symposium\\organized in Brussels on May 4, 2024.}
\end{center}
\vfill
On behalf of the organizing committee,\\[2cm]
Jo Smith\\
Chair of the organizing committee
\end{document}
";

/// Writes the example files into `dir` and returns their paths.
pub fn write_examples(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let files = [
        ("certmail.ini", EXAMPLE_CONFIG),
        ("recipients.csv", EXAMPLE_RECIPIENTS),
        ("template.html", EXAMPLE_HTML),
        ("template.txt", EXAMPLE_TEXT),
        ("certificate.tex", EXAMPLE_MARKUP),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content)?;
        info!("Wrote example {}", path.display());
        written.push(path);
    }

    Ok(written)
}
