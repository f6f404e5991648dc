//! Stats command implementation for the campus CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::session::write_counts;
use crate::{
    ARG_BUILDING_TYPE, ARG_MAP, CliError, DEFAULT_BUILDING_TYPE, ENV_STATS_MAP, load_map,
    require_existing,
};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "stats", about = "Print node, building and amenity counts")]
#[ortho_config(prefix = "CAMPUS")]
pub(crate) struct StatsArgs {
    /// Path to the OSM XML export.
    #[arg(long = ARG_MAP, value_name = "path")]
    #[serde(default)]
    pub(crate) map: Option<Utf8PathBuf>,
    /// Value of the `building` tag that selects campus buildings.
    #[arg(long = ARG_BUILDING_TYPE, value_name = "value")]
    #[serde(default)]
    pub(crate) building_type: Option<String>,
}

impl StatsArgs {
    pub(crate) fn into_config(self) -> Result<StatsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StatsConfig::try_from(merged)
    }
}

/// Resolved `stats` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatsConfig {
    pub(crate) map: Utf8PathBuf,
    pub(crate) building_type: String,
}

impl TryFrom<StatsArgs> for StatsConfig {
    type Error = CliError;

    fn try_from(args: StatsArgs) -> Result<Self, Self::Error> {
        let map = args.map.ok_or(CliError::MissingArgument {
            field: ARG_MAP,
            env: ENV_STATS_MAP,
        })?;
        Ok(Self {
            map,
            building_type: args
                .building_type
                .unwrap_or_else(|| DEFAULT_BUILDING_TYPE.to_owned()),
        })
    }
}

pub(crate) fn run_stats_with(args: StatsArgs, output: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    stats(&config, output)
}

pub(crate) fn stats(config: &StatsConfig, output: &mut dyn Write) -> Result<(), CliError> {
    require_existing(&config.map, ARG_MAP)?;
    let map = load_map(&config.map, &config.building_type)?;
    write_counts(&map, output).map_err(CliError::WriteStats)
}
