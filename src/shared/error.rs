use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI systems can tell a bad recipe collection apart from a bad invocation
/// or an environment failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// A plan was produced
    Success = 0,
    /// The recipe collection cannot be planned (duplicates, self-dependency, cycle)
    PlanningFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O, parse error, channel unreachable, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PlanningFailed => write!(f, "Planning Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors raised by the adapters and the CLI.
///
/// Domain failures live in `PlanningError`; these cover everything around it.
#[derive(Debug, Error)]
pub enum RamboError {
    #[error("Recipes directory not found: {path}\n\n💡 Hint: Pass the directory that holds one subdirectory per recipe")]
    RecipesDirNotFound { path: PathBuf },

    #[error("Invalid recipes path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid recipes directory")]
    InvalidRecipesPath { path: PathBuf, reason: String },

    #[error("Failed to parse recipe: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the recipe file is valid YAML or TOML with a package name and version")]
    RecipeParseError { path: PathBuf, details: String },

    #[error("Failed to load manifest: {path}\nDetails: {details}\n\n💡 Hint: A manifest is YAML with a 'packages' list and an optional 'channel_URL'")]
    ManifestError { path: PathBuf, details: String },

    #[error("Failed to fetch channel index: {location}\nDetails: {details}\n\n💡 Hint: Check the channel URL or path and that it contains '<platform>/repodata.json'")]
    ChannelFetchError { location: String, details: String },

    #[error("Culling requires a channel\n\n💡 Hint: Pass --channel, or set 'channel' in the config file or 'channel_URL' in the manifest")]
    MissingChannel,

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },
}
