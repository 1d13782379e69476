use crate::model::components::Components;
use crate::model::travel::{EstimateTier, TravelMode};
use gcdm_core::model::{Origin, TravelRV};
use serde::Serialize;
use std::collections::HashMap;

/// generalized cost of one mode to one airport.
#[derive(Debug, Clone, Serialize)]
pub struct ModeCost {
    pub mode: TravelMode,
    pub travel: TravelRV,
    /// source of the drive-based estimate, None for rail
    pub tier: Option<EstimateTier>,
    pub components: Components,
    /// NaN when the mode could not be costed
    pub total: f64,
}

/// per-mode costs to one airport and their smooth-minimum blend.
#[derive(Debug, Clone, Serialize)]
pub struct AirportCost {
    pub airport: String,
    pub distance_miles: f64,
    pub gc: f64,
    pub by_mode: Vec<ModeCost>,
}

impl AirportCost {
    /// mode totals, including NaN totals.
    pub fn mode_totals(&self) -> HashMap<TravelMode, f64> {
        self.by_mode.iter().map(|m| (m.mode, m.total)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OriginResult {
    pub origin: Origin,
    /// home airport cost minus the best alternative's
    pub delta_gc: f64,
    pub airports: Vec<AirportCost>,
}

impl OriginResult {
    pub fn airport(&self, code: &str) -> Option<&AirportCost> {
        self.airports.iter().find(|a| a.airport == code)
    }

    /// blended cost at an airport
    pub fn gc(&self, code: &str) -> Option<f64> {
        self.airport(code).map(|a| a.gc)
    }
}
