use certmail::certificate::{generate_all, CertificateDetails, CertificateGenerator};
use certmail::cli::{CertificateArgs, InputArgs, MessageArgs};
use certmail::mail::{self, Campaign, DeliveryOptions, SmtpSession, TerminalPrompt};
use certmail::recipient::{load_recipients, write_manifest};
use certmail::{
    Cli, Commands, Config, CertmailError, DrawnCertificate, MarkupCertificate, PlaceholderReplacer,
    Recipient, Result, Template,
};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Commands::Send {
            input,
            message,
            certificate,
            out,
            pause,
        } => {
            info!("Starting certificate mailing");
            let sent = send(&input, &message, &certificate, out.as_deref(), pause)?;
            println!("✓ Sent {} certificate(s)", sent);
        }

        Commands::Generate {
            input,
            certificate,
            out,
        } => {
            info!("Generating certificates");
            let count = generate(&input, &certificate, &out)?;
            println!("✓ Created {} certificate(s) in {}", count, out.display());
        }

        Commands::Preview {
            input,
            message,
            certificate,
            out,
        } => {
            info!("Writing message previews");
            let count = preview(&input, &message, &certificate, &out)?;
            println!("✓ Wrote {} message(s) to {}", count, out.display());
        }

        Commands::Init { output } => {
            let files = certmail::init::write_examples(&output)?;
            for file in files {
                println!("✓ Example file created: {}", file.display());
            }
        }
    }

    Ok(())
}

fn load_inputs(input: &InputArgs) -> Result<(Config, Vec<Recipient>)> {
    let config = Config::load(&input.config)?;
    let recipients = load_recipients(&input.emails)?;
    Ok((config, recipients))
}

fn load_campaign(config: &Config, message: &MessageArgs) -> Result<Campaign> {
    let html = Template::load(&message.template, PlaceholderReplacer::html())?;
    let plain = message
        .alt_template
        .as_ref()
        .map(|path| Template::load(path, PlaceholderReplacer::plain()))
        .transpose()?;
    Campaign::from_config(config, html, plain)
}

fn certificate_generator(
    config: &Config,
    certificate: &CertificateArgs,
) -> Result<Box<dyn CertificateGenerator>> {
    match &certificate.markup {
        Some(path) => {
            let template = Template::load(path, PlaceholderReplacer::markup())?;
            Ok(Box::new(MarkupCertificate::new(template, certificate.compiler.as_str())))
        }
        None => {
            let details = CertificateDetails::from_config(config)?;
            Ok(Box::new(DrawnCertificate::new(details)))
        }
    }
}

fn generate_into(
    config: &Config,
    certificate: &CertificateArgs,
    recipients: &mut [Recipient],
    out: &Path,
) -> Result<usize> {
    let generator = certificate_generator(config, certificate)?;
    generate_all(generator.as_ref(), recipients, out)
}

fn send(
    input: &InputArgs,
    message: &MessageArgs,
    certificate: &CertificateArgs,
    out: Option<&Path>,
    pause: u64,
) -> Result<usize> {
    let (config, mut recipients) = load_inputs(input)?;
    let campaign = load_campaign(&config, message)?;

    match out {
        Some(out) => {
            generate_into(&config, certificate, &mut recipients, out)?;
        }
        None if certificate.markup.is_some() => {
            return Err(CertmailError::OutputFolderRequired);
        }
        None => info!("No output folder given, sending without generating certificates"),
    }

    let settings = config.smtp_settings()?;
    let options = DeliveryOptions::new(settings.login.as_str()).pause(Duration::from_secs(pause));
    let mut session = SmtpSession::connect(&settings)?;
    mail::deliver(&mut session, &mut TerminalPrompt, &options, &campaign, &recipients)
}

fn generate(input: &InputArgs, certificate: &CertificateArgs, out: &Path) -> Result<usize> {
    let (config, mut recipients) = load_inputs(input)?;
    let count = generate_into(&config, certificate, &mut recipients, out)?;
    write_manifest(&recipients, out.join("manifest.json"))?;
    Ok(count)
}

fn preview(
    input: &InputArgs,
    message: &MessageArgs,
    certificate: &CertificateArgs,
    out: &Path,
) -> Result<usize> {
    let (config, mut recipients) = load_inputs(input)?;
    let campaign = load_campaign(&config, message)?;
    generate_into(&config, certificate, &mut recipients, out)?;

    for recipient in &recipients {
        let message = campaign.compose(recipient)?;
        let path = out.join(format!("{}.eml", recipient.file_stem()));
        mail::write_eml(&message, &path)?;
        println!("Wrote {}", path.display());
    }

    Ok(recipients.len())
}
