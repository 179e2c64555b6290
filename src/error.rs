use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dep file not found: {}", .0.display())]
    PinFileMissing(PathBuf),

    #[error("Working version is unbound")]
    VersionUnbound,

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("No tags published for {0}")]
    NoTags(String),

    #[error("{0} not found - install it to continue")]
    ToolMissing(&'static str),

    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl Error {
    /// Process exit code reported for this failure.
    ///
    /// Precondition failures on the pin file keep their historical codes;
    /// everything downstream maps to a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PinFileMissing(_) => 2,
            Error::VersionUnbound => 5,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::PinFileMissing(PathBuf::from("deps.nix")).exit_code(), 2);
        assert_eq!(Error::VersionUnbound.exit_code(), 5);
        assert_eq!(Error::Api("boom".into()).exit_code(), 1);
        assert_eq!(Error::NoTags("edo9300/edopro".into()).exit_code(), 1);
    }
}
