use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::GcdmAppError;

/// airport access generalized cost and itinerary scoring
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GcdmCliArguments {
    /// select the operation to run
    #[command(subcommand)]
    pub op: GcdmOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum GcdmOperation {
    /// computes the generalized cost of every study airport from each origin and
    /// the home airport's advantage over the best alternative.
    Run {
        /// configuration file (.yaml, .toml or .json)
        #[arg(short, long)]
        config: String,
        /// CSV of origins with columns id (or zip), lon, lat
        #[arg(long)]
        origins: String,
        /// output directory path.
        #[arg(short, long, default_value_t = String::from("."))]
        output_directory: String,
    },
    /// scores competing itineraries using the access cost of one origin.
    Qsi {
        /// configuration file (.yaml, .toml or .json)
        #[arg(short, long)]
        config: String,
        /// CSV of origins with columns id (or zip), lon, lat
        #[arg(long)]
        origins: String,
        /// JSON array of itineraries. bundled demo itineraries are used when omitted.
        #[arg(short, long)]
        itineraries: Option<String>,
        /// origin whose access cost is used. defaults to the middle row of the origins file.
        #[arg(long)]
        origin_id: Option<String>,
        /// output directory path.
        #[arg(short, long, default_value_t = String::from("."))]
        output_directory: String,
    },
}

impl GcdmOperation {
    pub fn run(&self) -> Result<(), GcdmAppError> {
        match self {
            GcdmOperation::Run {
                config,
                origins,
                output_directory,
            } => crate::app::run_gcdm(
                Path::new(config),
                Path::new(origins),
                Path::new(output_directory),
            ),
            GcdmOperation::Qsi {
                config,
                origins,
                itineraries,
                origin_id,
                output_directory,
            } => crate::app::run_qsi(
                Path::new(config),
                Path::new(origins),
                itineraries.as_ref().map(Path::new),
                origin_id.as_deref(),
                Path::new(output_directory),
            ),
        }
    }
}
