//! Error types emitted by the campus CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use campus_data::OsmLoadError;
use thiserror::Error;

/// Errors emitted by the campus CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was configured.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Loading the map export failed.
    #[error("failed to load map: {0}")]
    LoadMap(#[from] OsmLoadError),
    /// Reading commands or writing answers during a session failed.
    #[error("interactive session failed: {0}")]
    Session(#[source] std::io::Error),
    /// Writing the map statistics failed.
    #[error("failed to write map statistics: {0}")]
    WriteStats(#[source] std::io::Error),
}
