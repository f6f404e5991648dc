//! Explore command implementation for the campus CLI.

use std::io::{BufRead, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::{
    ARG_BUILDING_TYPE, ARG_MAP, ARG_NEAREST_CATEGORY, CliError, DEFAULT_BUILDING_TYPE,
    DEFAULT_NEAREST_CATEGORY, ENV_EXPLORE_MAP, load_map, require_existing,
};

/// CLI arguments for the `explore` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "explore",
    long_about = "Load an OpenStreetMap XML export and answer commands read \
                 from standard input: `b` for buildings, `a` for amenities, \
                 `f` for the nearest amenity to a building and `$` to end.",
    about = "Explore buildings and amenities interactively"
)]
#[ortho_config(prefix = "CAMPUS")]
pub(crate) struct ExploreArgs {
    /// Path to the OSM XML export.
    #[arg(long = ARG_MAP, value_name = "path")]
    #[serde(default)]
    pub(crate) map: Option<Utf8PathBuf>,
    /// Value of the `building` tag that selects campus buildings.
    #[arg(long = ARG_BUILDING_TYPE, value_name = "value")]
    #[serde(default)]
    pub(crate) building_type: Option<String>,
    /// Amenity category searched by the `f` command.
    #[arg(long = ARG_NEAREST_CATEGORY, value_name = "category")]
    #[serde(default)]
    pub(crate) nearest_category: Option<String>,
}

impl ExploreArgs {
    pub(crate) fn into_config(self) -> Result<ExploreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExploreConfig::try_from(merged)
    }
}

/// Resolved `explore` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExploreConfig {
    pub(crate) map: Utf8PathBuf,
    pub(crate) building_type: String,
    pub(crate) nearest_category: String,
}

impl ExploreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.map, ARG_MAP)
    }
}

impl TryFrom<ExploreArgs> for ExploreConfig {
    type Error = CliError;

    fn try_from(args: ExploreArgs) -> Result<Self, Self::Error> {
        let map = args.map.ok_or(CliError::MissingArgument {
            field: ARG_MAP,
            env: ENV_EXPLORE_MAP,
        })?;
        Ok(Self {
            map,
            building_type: args
                .building_type
                .unwrap_or_else(|| DEFAULT_BUILDING_TYPE.to_owned()),
            nearest_category: args
                .nearest_category
                .unwrap_or_else(|| DEFAULT_NEAREST_CATEGORY.to_owned()),
        })
    }
}

pub(crate) fn run_explore_with(
    args: ExploreArgs,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    explore(&config, input, output)
}

/// Validate, load and run the session for an already resolved configuration.
pub(crate) fn explore(
    config: &ExploreConfig,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let map = load_map(&config.map, &config.building_type)?;
    Session::new(&map, &config.nearest_category)
        .run(input, output)
        .map_err(CliError::Session)
}
