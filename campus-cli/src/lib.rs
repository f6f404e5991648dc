//! Command-line interface for exploring a campus map export.
#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};

use camino::Utf8Path;
use campus_core::CampusMap;
use clap::{Parser, Subcommand};
use log::info;

mod error;
mod explore;
mod session;
mod stats;

pub use error::CliError;

use explore::ExploreArgs;
use stats::StatsArgs;

pub(crate) const ARG_MAP: &str = "map";
pub(crate) const ARG_BUILDING_TYPE: &str = "building-type";
pub(crate) const ARG_NEAREST_CATEGORY: &str = "nearest-category";
pub(crate) const ENV_EXPLORE_MAP: &str = "CAMPUS_CMDS_EXPLORE_MAP";
pub(crate) const ENV_STATS_MAP: &str = "CAMPUS_CMDS_STATS_MAP";

/// `building` tag value selected when none is configured.
pub const DEFAULT_BUILDING_TYPE: &str = "university";
/// Amenity category searched by the `f` command when none is configured.
pub const DEFAULT_NEAREST_CATEGORY: &str = "fast_food";

/// Run the campus CLI with the current process arguments and environment.
///
/// The `explore` session reads commands from standard input and answers on
/// standard output.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the map
/// cannot be loaded, or terminal I/O fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_command(cli.command, &mut stdin.lock(), &mut stdout.lock())
}

fn run_command(
    command: Command,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Explore(args) => explore::run_explore_with(args, input, output),
        Command::Stats(args) => stats::run_stats_with(args, output),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "campus",
    about = "Search buildings and amenities in an OpenStreetMap campus export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a map and answer building and amenity queries interactively.
    Explore(ExploreArgs),
    /// Load a map and print its summary counts.
    Stats(StatsArgs),
}

/// Load the export at `path` and derive the campus map from it.
pub(crate) fn load_map(path: &Utf8Path, building_type: &str) -> Result<CampusMap, CliError> {
    let report = campus_data::load_osm_xml(path)?;
    let map = CampusMap::from_elements(&report.elements, building_type);
    info!("Map at {path} is ready for queries");
    Ok(map)
}

/// Check that a configured input path names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match campus_data::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
