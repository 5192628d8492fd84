use log::info;

use super::transport::MailTransport;
use crate::error::{CertmailError, Result};
use crate::retry::RetryPolicy;

/// Number of password attempts before the run is aborted.
pub const LOGIN_ATTEMPTS: u32 = 3;

/// Source of the mail account secret.
pub trait PasswordPrompt {
    fn read_password(&mut self) -> std::io::Result<String>;
}

/// Asks on the terminal without echoing.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&mut self) -> std::io::Result<String> {
        rpassword::prompt_password("Password: ")
    }
}

/// Prompts for the password and logs in, re-prompting on failure.
///
/// When every attempt fails the last failure is returned together with the
/// number of attempts made. A prompt that cannot be read ends the retries.
pub fn authenticate<T, P>(
    transport: &mut T,
    login: &str,
    prompt: &mut P,
    policy: &RetryPolicy,
) -> Result<()>
where
    T: MailTransport + ?Sized,
    P: PasswordPrompt + ?Sized,
{
    policy
        .run_if(
            |_attempt| -> Result<()> {
                let password = prompt
                    .read_password()
                    .map_err(CertmailError::PasswordPrompt)?;
                transport.login(login, &password).inspect_err(|_| {
                    println!(
                        "Failed to login to smtp server. Please retype password or check port number and credentials."
                    );
                })
            },
            |e| !matches!(e, CertmailError::PasswordPrompt(_)),
        )
        .map_err(|exhausted| CertmailError::AuthenticationFailed {
            attempts: exhausted.attempts,
            source: Box::new(exhausted.last),
        })?;

    info!("Logged in as {}", login);
    Ok(())
}
