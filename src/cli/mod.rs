pub mod args;

pub use args::{CertificateArgs, Cli, Commands, InputArgs, MessageArgs};
