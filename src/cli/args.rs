use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::certificate::markup::DEFAULT_COMPILER;

#[derive(Parser, Debug)]
#[command(name = "certmail")]
#[command(author, version, about, long_about = None)]
#[command(about = "Generate certificates and mail them to a list of recipients")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// .ini file with configuration values to use
    #[arg(short, long)]
    pub config: PathBuf,

    /// .csv file (comma separated) with first name, last name and email columns
    #[arg(short, long)]
    pub emails: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CertificateArgs {
    /// Markup template compiled per recipient instead of drawing the certificate
    #[arg(short, long)]
    pub markup: Option<PathBuf>,

    /// Program that compiles the markup template to PDF
    #[arg(long, default_value = DEFAULT_COMPILER)]
    pub compiler: String,
}

#[derive(Args, Debug, Clone)]
pub struct MessageArgs {
    /// Email template to use (.html)
    #[arg(short, long)]
    pub template: PathBuf,

    /// Alternative plain text template to use (.txt)
    #[arg(short, long)]
    pub alt_template: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate certificates and mail them to every recipient
    Send {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        message: MessageArgs,

        #[command(flatten)]
        certificate: CertificateArgs,

        /// Output folder for generated certificates (required with --markup)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Seconds to wait before each message
        #[arg(long, default_value_t = 5)]
        pause: u64,
    },

    /// Generate certificates without sending anything
    Generate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        certificate: CertificateArgs,

        /// Output folder for generated certificates
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Generate certificates and write every message as an .eml file
    Preview {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        message: MessageArgs,

        #[command(flatten)]
        certificate: CertificateArgs,

        /// Output folder for certificates and .eml files
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Write example configuration, recipients and templates
    Init {
        /// Folder to write the example files into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from([
            "certmail", "send", "-c", "c.ini", "-e", "r.csv", "-t", "t.html", "-a", "t.txt",
            "-o", "out",
        ])
        .unwrap();

        match cli.command {
            Commands::Send {
                input,
                message,
                certificate,
                out,
                pause,
            } => {
                assert_eq!(input.config, PathBuf::from("c.ini"));
                assert_eq!(input.emails, PathBuf::from("r.csv"));
                assert_eq!(message.alt_template, Some(PathBuf::from("t.txt")));
                assert_eq!(certificate.markup, None);
                assert_eq!(certificate.compiler, DEFAULT_COMPILER);
                assert_eq!(out, Some(PathBuf::from("out")));
                assert_eq!(pause, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_requires_out() {
        assert!(Cli::try_parse_from(["certmail", "generate", "-c", "c.ini", "-e", "r.csv"]).is_err());
    }
}
