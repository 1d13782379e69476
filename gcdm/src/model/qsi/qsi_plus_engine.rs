use super::{qsi_ops, Itinerary, QsiResult};
use crate::config::QsiConfig;
use crate::model::generalized_cost::softmin_ops;
use crate::model::travel::TravelMode;
use std::collections::HashMap;

/// scores a market of competing itineraries from one origin.
pub struct QsiPlusEngine {
    conf: QsiConfig,
}

impl QsiPlusEngine {
    /// segments scored when none are configured or requested
    pub const DEFAULT_SEGMENTS: [&'static str; 2] = ["domestic", "intl"];

    pub fn new(conf: QsiConfig) -> QsiPlusEngine {
        QsiPlusEngine { conf }
    }

    /// smooth minimum of the per-mode access costs, ignoring modes that could not be costed.
    pub fn softmin_access(&self, per_mode_gc: &HashMap<TravelMode, f64>) -> f64 {
        let values: Vec<f64> = per_mode_gc.values().copied().collect();
        softmin_ops::softmin_finite(&values, self.conf.mu_access)
    }

    pub fn access_factor(&self, gc_soft: f64) -> f64 {
        qsi_ops::access_factor(self.conf.beta_access, gc_soft)
    }

    /// configured segment names, or the defaults when none are configured.
    pub fn segment_names(&self) -> Vec<String> {
        if self.conf.segments.is_empty() {
            Self::DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.conf.segments.iter().map(|s| s.name.clone()).collect()
        }
    }

    /// `A * sum over segments s, states t and itineraries k of w_s * pi_t * W(k, s, t)`
    /// where A is the access factor of the blended access cost.
    pub fn qsi_plus_for_market(
        &self,
        per_mode_gc: &HashMap<TravelMode, f64>,
        itineraries: &[Itinerary],
        segments: &[String],
    ) -> QsiResult {
        let gc_soft = self.softmin_access(per_mode_gc);
        let access_factor = self.access_factor(gc_soft);
        let states = self.conf.normalized_states();
        let mut w_sum = 0.0;
        for name in segments.iter() {
            let segment = self.conf.segment(name);
            for state in states.iter() {
                for itinerary in itineraries.iter() {
                    w_sum += segment.weight
                        * state.weight
                        * qsi_ops::itinerary_weight(&self.conf, itinerary, &segment, state);
                }
            }
        }
        log::debug!(
            "qsi market: access cost {gc_soft:.2}, access factor {access_factor:.4}, weight {w_sum:.6}"
        );
        QsiResult::new(access_factor, w_sum)
    }
}
