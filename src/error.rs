use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error
{
    #[error("[{}] IoError: \"{path}\": {err}", crate::NAME)]
    Io
    {
        err:  std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("[{}] ConfigParseError: {0}", crate::NAME)]
    ConfigParse(String),

    #[error("[{}] PipelineSerializeError: {0}", crate::NAME)]
    PipelineSerialize(String),

    #[error("[{}] MissingPageInfoError: \"{0}\": Missing page info in file", crate::NAME)]
    MissingPageInfo(PathBuf),

    #[error("[{}] ParsePageInfoError: \"{path}\": {err}", crate::NAME)]
    ParsePageInfo
    {
        err: String, path: PathBuf
    },

    #[error("[{}] ReadSourceDirError: \"{path}\": {err}", crate::NAME)]
    ReadSourceDir
    {
        err: String, path: PathBuf
    },

    #[error("[{}] MissingSourceFilesError: \"{0}\": No source files found", crate::NAME)]
    MissingSourceFiles(PathBuf),

    #[error(
        "[{}] HookAlreadyRegisteredError: The implicit layout hook can only be registered once",
        crate::NAME
    )]
    HookAlreadyRegistered,

    #[error(
        "[{}] AsyncJoinError: There was an internal error while loading posts.",
        crate::NAME
    )]
    AsyncJoin,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error
{
    /// sysexits(3) code for this error.
    pub fn exit_code(&self) -> i32
    {
        match self {
            Error::Io { .. } => 74,
            Error::ConfigParse(_) => 78,
            _ => 64,
        }
    }

    pub fn unwrap_gracefully<T>(x: Result<T>) -> T
    {
        x.unwrap_or_else(|e| e.report_and_exit())
    }

    /// Prints the error and exits with [`Error::exit_code`]. Fatal errors are
    /// always printed, whatever `RUST_LOG` says.
    pub fn report_and_exit(&self) -> !
    {
        eprintln!("{self}");
        std::process::exit(self.exit_code());
    }

    /// Logs an error that doesn't stop the current operation.
    pub fn report(&self)
    {
        log::warn!("{self}");
    }
}
