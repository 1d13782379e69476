//! reading origins and itineraries, writing results tables.
use super::GcdmAppError;
use crate::model::generalized_cost::OriginResult;
use crate::model::qsi::{Itinerary, QsiResult};
use crate::model::travel::EstimateTier;
use gcdm_core::model::Origin;
use itertools::Itertools;
use kdam::tqdm;
use serde::Serialize;
use std::path::Path;

pub const RESULTS_FILENAME: &str = "gcdm_results.csv";
pub const COMPONENTS_FILENAME: &str = "gcdm_components.csv";
pub const QSI_SUMMARY_FILENAME: &str = "qsi_plus_summary.csv";

/// reads origin centroids from a CSV with columns id (or zip), lon, lat.
pub fn read_origins(path: &Path) -> Result<Vec<Origin>, GcdmAppError> {
    let filepath = path.to_string_lossy().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| GcdmAppError::ReadError {
            filepath: filepath.clone(),
            error: e.to_string(),
        })?;
    let rows = tqdm!(reader.deserialize::<Origin>(), desc = "read origins");
    let origins = rows
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| GcdmAppError::ReadError {
                filepath: filepath.clone(),
                error: format!("row {idx}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    eprintln!();
    if origins.is_empty() {
        return Err(GcdmAppError::NoOrigins(filepath));
    }
    log::info!("read {} origins from {filepath}", origins.len());
    Ok(origins)
}

/// reads a JSON array of itineraries.
pub fn read_itineraries(path: &Path) -> Result<Vec<Itinerary>, GcdmAppError> {
    let filepath = path.to_string_lossy().to_string();
    let contents = std::fs::read_to_string(path).map_err(|e| GcdmAppError::ReadError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| GcdmAppError::ReadError {
        filepath,
        error: e.to_string(),
    })
}

/// formats a cost cell. non-finite values are written as empty cells.
fn cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// writes one row per origin: id, lon, lat, delta_gc, then GC_<airport> for each airport.
pub fn write_results(
    path: &Path,
    airports: &[String],
    results: &[OriginResult],
) -> Result<(), GcdmAppError> {
    let filepath = path.to_string_lossy().to_string();
    let write_err = |e: csv::Error| GcdmAppError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    let header = ["id", "lon", "lat", "delta_gc"]
        .into_iter()
        .map(String::from)
        .chain(airports.iter().map(|a| format!("GC_{a}")))
        .collect_vec();
    writer.write_record(&header).map_err(write_err)?;
    for result in results.iter() {
        let row = [
            result.origin.id.clone(),
            result.origin.lon.to_string(),
            result.origin.lat.to_string(),
            cell(result.delta_gc),
        ]
        .into_iter()
        .chain(airports.iter().map(|a| cell(result.gc(a).unwrap_or(f64::NAN))))
        .collect_vec();
        writer.write_record(&row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| GcdmAppError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    log::info!("wrote {} rows to {filepath}", results.len());
    Ok(())
}

#[derive(Serialize)]
struct ComponentRow<'a> {
    id: &'a str,
    airport: &'a str,
    mode: &'a str,
    tier: Option<EstimateTier>,
    distance_miles: f64,
    access_mean: f64,
    access_sd: f64,
    cash: f64,
    timeval: f64,
    risk: f64,
    sched: f64,
    xfer: f64,
    comfort: f64,
    carbon: f64,
    total: f64,
}

/// writes the long-format breakdown of every origin, airport and mode.
pub fn write_components(path: &Path, results: &[OriginResult]) -> Result<(), GcdmAppError> {
    let filepath = path.to_string_lossy().to_string();
    let write_err = |e: csv::Error| GcdmAppError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    for result in results.iter() {
        for airport in result.airports.iter() {
            for mode in airport.by_mode.iter() {
                let c = &mode.components;
                let row = ComponentRow {
                    id: &result.origin.id,
                    airport: &airport.airport,
                    mode: mode.mode.as_str(),
                    tier: mode.tier,
                    distance_miles: airport.distance_miles,
                    access_mean: mode.travel.mean,
                    access_sd: mode.travel.sd,
                    cash: c.cash,
                    timeval: c.timeval,
                    risk: c.risk,
                    sched: c.sched,
                    xfer: c.xfer,
                    comfort: c.comfort,
                    carbon: c.carbon,
                    total: mode.total,
                };
                writer.serialize(row).map_err(write_err)?;
            }
        }
    }
    writer.flush().map_err(|e| GcdmAppError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// writes the single-row market score with columns A, W_sum, QSI_plus.
pub fn write_qsi_summary(path: &Path, result: &QsiResult) -> Result<(), GcdmAppError> {
    let filepath = path.to_string_lossy().to_string();
    let write_err = |e: csv::Error| GcdmAppError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.serialize(result).map_err(write_err)?;
    writer.flush().map_err(|e| GcdmAppError::WriteError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::generalized_cost::AirportCost;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gcdm_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_read_origins_accepts_zip_column() {
        let path = temp_path("origins.csv");
        let mut file = std::fs::File::create(&path).expect("test invariant");
        writeln!(file, "zip,lon,lat\n06511,-72.93,41.31\n06460, -73.05 ,41.22").expect("test invariant");
        drop(file);
        let origins = read_origins(&path).expect("test invariant");
        let _ = std::fs::remove_file(&path);
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0].id, "06511");
        assert_eq!(origins[1].lon, -73.05);
    }

    #[test]
    fn test_write_results_columns() {
        let path = temp_path("results.csv");
        let airport = |code: &str, gc: f64| AirportCost {
            airport: code.to_string(),
            distance_miles: 10.0,
            gc,
            by_mode: vec![],
        };
        let results = vec![OriginResult {
            origin: Origin::new("06511", -72.93, 41.31),
            delta_gc: f64::NAN,
            airports: vec![airport("HVN", 120.5), airport("JFK", f64::NAN)],
        }];
        let airports = vec![String::from("HVN"), String::from("JFK")];
        write_results(&path, &airports, &results).expect("test invariant");
        let contents = std::fs::read_to_string(&path).expect("test invariant");
        let _ = std::fs::remove_file(&path);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "id,lon,lat,delta_gc,GC_HVN,GC_JFK");
        assert_eq!(lines[1], "06511,-72.93,41.31,,120.5,");
    }
}
