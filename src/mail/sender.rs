use std::time::Duration;

use log::{debug, info, warn};

use super::auth::{authenticate, PasswordPrompt, LOGIN_ATTEMPTS};
use super::campaign::Campaign;
use super::transport::MailTransport;
use crate::error::Result;
use crate::recipient::Recipient;
use crate::retry::RetryPolicy;

/// Wait before each message so the server does not throttle the batch.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DeliveryOptions {
    pub login: String,
    pub pause: Duration,
    pub login_policy: RetryPolicy,
}

impl DeliveryOptions {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            pause: DEFAULT_PAUSE,
            login_policy: RetryPolicy::new(LOGIN_ATTEMPTS),
        }
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }
}

/// Sends one message per recipient, in order.
///
/// The first failure stops the loop; recipients after it get nothing.
pub fn send_all<T>(
    transport: &mut T,
    campaign: &Campaign,
    recipients: &[Recipient],
    pause: Duration,
) -> Result<usize>
where
    T: MailTransport + ?Sized,
{
    let mut sent = 0usize;
    for recipient in recipients {
        if !pause.is_zero() {
            debug!("Waiting {:?} before next message", pause);
            std::thread::sleep(pause);
        }

        let message = campaign.compose(recipient)?;
        transport.send(&message)?;

        info!("Delivered certificate to {}", recipient.email);
        println!("Message sent to {}.", recipient.email);
        sent += 1;
    }
    Ok(sent)
}

/// Logs in, sends every message and closes the session.
///
/// The session is closed whether or not sending succeeded. A close failure
/// is only reported when nothing failed before it.
pub fn deliver<T, P>(
    transport: &mut T,
    prompt: &mut P,
    options: &DeliveryOptions,
    campaign: &Campaign,
    recipients: &[Recipient],
) -> Result<usize>
where
    T: MailTransport + ?Sized,
    P: PasswordPrompt + ?Sized,
{
    let outcome = authenticate(transport, &options.login, prompt, &options.login_policy)
        .and_then(|()| send_all(transport, campaign, recipients, options.pause));
    let closed = transport.close();

    match (outcome, closed) {
        (Ok(sent), Ok(())) => {
            println!("Closed connection to mail server.");
            Ok(sent)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_error) = closed {
                warn!("Could not close mail session cleanly: {}", close_error);
            }
            Err(e)
        }
    }
}
