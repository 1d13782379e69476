use crate::config::ScheduleConfig;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleParseError {
    #[error("schedule.t_depart_iso is not set")]
    MissingDeparture,
    #[error("no curb window configured for airport {0}")]
    MissingWindow(String),
    #[error("invalid ISO-8601 timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// acceptable curb arrival window, in minutes relative to the departure time.
/// windows read from the schedule are negative when they fall before departure,
/// and curb arrival is `t_depart - access` minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurbWindow {
    pub t_depart: f64,
    pub tmin: f64,
    pub tmax: f64,
}

impl CurbWindow {
    /// used when the schedule cannot be read. the bounds are positive, i.e. after
    /// departure, so any non-negative access time is penalized as early arrival.
    pub const DEFAULT: CurbWindow = CurbWindow {
        t_depart: 0.0,
        tmin: 60.0,
        tmax: 120.0,
    };

    /// reads the window for an airport from the schedule timestamps.
    pub fn try_from_schedule(
        schedule: &ScheduleConfig,
        airport: &str,
    ) -> Result<CurbWindow, ScheduleParseError> {
        let depart = schedule
            .t_depart_iso
            .as_deref()
            .ok_or(ScheduleParseError::MissingDeparture)?;
        let window = schedule
            .curb_windows
            .get(airport)
            .ok_or_else(|| ScheduleParseError::MissingWindow(airport.to_string()))?;
        let t_depart = parse_iso(depart)?;
        let tmin = parse_iso(&window.tmin)?;
        let tmax = parse_iso(&window.tmax)?;
        Ok(CurbWindow {
            t_depart: 0.0,
            tmin: minutes_between(&t_depart, &tmin),
            tmax: minutes_between(&t_depart, &tmax),
        })
    }

    /// as [`CurbWindow::try_from_schedule`], logging and substituting
    /// [`CurbWindow::DEFAULT`] on failure.
    pub fn from_schedule_or_default(schedule: &ScheduleConfig, airport: &str) -> CurbWindow {
        match Self::try_from_schedule(schedule, airport) {
            Ok(window) => window,
            Err(e) => {
                log::warn!("using default curb window for {airport}: {e}");
                Self::DEFAULT
            }
        }
    }
}

fn parse_iso(value: &str) -> Result<DateTime<FixedOffset>, ScheduleParseError> {
    DateTime::parse_from_rfc3339(value).map_err(|source| ScheduleParseError::InvalidTimestamp {
        value: value.to_string(),
        source,
    })
}

fn minutes_between(from: &DateTime<FixedOffset>, to: &DateTime<FixedOffset>) -> f64 {
    (*to - *from).num_seconds() as f64 / 60.0
}
