use std::fmt;

use log::{debug, warn};

/// Bounded retry without delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

/// Every attempt failed. `last` is the most recent failure.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last: E,
}

impl RetryPolicy {
    /// A policy allowing `max_attempts` tries, at least one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs `operation` until it succeeds or the attempts are used up.
    ///
    /// The closure receives the 1-based attempt number.
    pub fn run<T, E, F>(&self, operation: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Result<T, E>,
        E: fmt::Display,
    {
        self.run_if(operation, |_| true)
    }

    /// Like [`run`](Self::run), but stops at the first error `retryable`
    /// rejects.
    pub fn run_if<T, E, F, R>(&self, mut operation: F, retryable: R) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Result<T, E>,
        R: Fn(&E) -> bool,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt) {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Operation succeeded on attempt {}", attempt);
                    }
                    return Ok(value);
                }
                Err(e) if !retryable(&e) => {
                    warn!("Attempt {} failed and will not be retried: {}", attempt, e);
                    return Err(RetryExhausted { attempts: attempt, last: e });
                }
                Err(e) if attempt >= self.max_attempts => {
                    warn!("Operation failed after {} attempts: {}", attempt, e);
                    return Err(RetryExhausted { attempts: attempt, last: e });
                }
                Err(e) => {
                    debug!("Attempt {}/{} failed: {}", attempt, self.max_attempts, e);
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
