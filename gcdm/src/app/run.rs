use super::{io_ops, GcdmAppError};
use crate::config::GcdmConfig;
use crate::model::generalized_cost::GeneralizedCostModel;
use crate::model::qsi::{Itinerary, QsiPlusEngine};
use std::path::Path;

/// runs the generalized cost model for every origin and writes the results tables.
///
/// # Arguments
///
/// * `config_path` - GCDM configuration file
/// * `origins_path` - CSV of origins with id (or zip), lon, lat columns
/// * `output_directory` - directory receiving gcdm_results.csv and gcdm_components.csv
pub fn run_gcdm(
    config_path: &Path,
    origins_path: &Path,
    output_directory: &Path,
) -> Result<(), GcdmAppError> {
    let conf = GcdmConfig::try_from(config_path)?;
    let airports = conf.region.airports.clone();
    let model = GeneralizedCostModel::try_from_config(conf)?;
    let origins = io_ops::read_origins(origins_path)?;
    let results = model.run(&origins)?;

    create_output_directory(output_directory)?;
    io_ops::write_results(
        &output_directory.join(io_ops::RESULTS_FILENAME),
        &airports,
        &results,
    )?;
    io_ops::write_components(&output_directory.join(io_ops::COMPONENTS_FILENAME), &results)?;
    Ok(())
}

/// scores a market of itineraries using the home airport access cost of a single origin.
///
/// # Arguments
///
/// * `config_path` - GCDM configuration file
/// * `origins_path` - CSV of origins with id (or zip), lon, lat columns
/// * `itineraries_path` - JSON itineraries. bundled demo itineraries are used when None
/// * `origin_id` - origin to score from. the middle row of the origins file is used when None
/// * `output_directory` - directory receiving qsi_plus_summary.csv
pub fn run_qsi(
    config_path: &Path,
    origins_path: &Path,
    itineraries_path: Option<&Path>,
    origin_id: Option<&str>,
    output_directory: &Path,
) -> Result<(), GcdmAppError> {
    let conf = GcdmConfig::try_from(config_path)?;
    let home = conf.region.home_airport.clone();
    let engine = QsiPlusEngine::new(conf.qsi.clone());
    let model = GeneralizedCostModel::try_from_config(conf)?;

    let origins = io_ops::read_origins(origins_path)?;
    let origin = match origin_id {
        Some(id) => origins
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| GcdmAppError::OriginNotFound(id.to_string()))?,
        None => &origins[origins.len() / 2],
    };
    log::info!("scoring itineraries from origin {}", origin.id);

    let result = model
        .run(std::slice::from_ref(origin))?
        .into_iter()
        .next()
        .ok_or_else(|| GcdmAppError::InternalError(String::from("model returned no result")))?;
    let per_mode_gc = result
        .airport(&home)
        .map(|a| a.mode_totals())
        .ok_or_else(|| {
            GcdmAppError::InternalError(format!("home airport {home} missing from result"))
        })?;

    let itineraries = match itineraries_path {
        Some(path) => io_ops::read_itineraries(path)?,
        None => Itinerary::demo_itineraries().map_err(|e| GcdmAppError::ReadError {
            filepath: String::from("demo_itineraries.json"),
            error: e.to_string(),
        })?,
    };
    let segments = engine.segment_names();
    let summary = engine.qsi_plus_for_market(&per_mode_gc, &itineraries, &segments);
    log::info!(
        "A={:.4} W_sum={:.4} QSI_plus={:.4} over {} itineraries",
        summary.access_factor,
        summary.w_sum,
        summary.qsi_plus,
        itineraries.len()
    );

    create_output_directory(output_directory)?;
    io_ops::write_qsi_summary(&output_directory.join(io_ops::QSI_SUMMARY_FILENAME), &summary)?;
    Ok(())
}

fn create_output_directory(output_directory: &Path) -> Result<(), GcdmAppError> {
    std::fs::create_dir_all(output_directory).map_err(|e| GcdmAppError::WriteError {
        filepath: output_directory.to_string_lossy().to_string(),
        error: e.to_string(),
    })
}
