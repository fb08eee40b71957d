//! CLI error type and exit-code mapping.

use std::fmt;

use seenmap::{ComposeError, DiscoveryError};

/// Errors surfaced to the user by the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Region discovery failed.
    Discovery(DiscoveryError),

    /// The composite pass failed.
    Compose(ComposeError),

    /// The finished image could not be written.
    Write(image::ImageError),
}

impl CliError {
    /// Process exit code for the failure: 2 when there is nothing to
    /// render, 3 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Discovery(DiscoveryError::NoRegions(_)) => 2,
            _ => 3,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Discovery(e) => write!(f, "{}", e),
            CliError::Compose(e) => write!(f, "{}", e),
            CliError::Write(e) => write!(f, "failed to write output image: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Discovery(e) => Some(e),
            CliError::Compose(e) => Some(e),
            CliError::Write(e) => Some(e),
        }
    }
}

impl From<DiscoveryError> for CliError {
    fn from(e: DiscoveryError) -> Self {
        CliError::Discovery(e)
    }
}

impl From<ComposeError> for CliError {
    fn from(e: ComposeError) -> Self {
        CliError::Compose(e)
    }
}

impl From<image::ImageError> for CliError {
    fn from(e: image::ImageError) -> Self {
        CliError::Write(e)
    }
}
