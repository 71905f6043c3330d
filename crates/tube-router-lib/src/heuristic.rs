//! Lower-bound travel time estimates used to guide A* search.
//!
//! [`GeographicHeuristic`] converts the great-circle distance between two
//! stations into minutes at an assumed top speed. The estimate is admissible
//! only when no connection in the network is faster than that speed and
//! transfer penalties are non-negative. Choosing a realistic bound is the
//! caller's responsibility; the engine does not correct for it.

use crate::error::{Error, Result};
use crate::network::Station;

/// Mean earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default speed bound in km/h for metro networks.
pub const DEFAULT_MAX_KMPH: f64 = 120.0;

/// Estimate of the remaining travel time, in minutes, from one station to the
/// goal.
pub trait Heuristic {
    fn estimate(&self, from: &Station, goal: &Station) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&Station, &Station) -> f64,
{
    fn estimate(&self, from: &Station, goal: &Station) -> f64 {
        self(from, goal)
    }
}

/// Heuristic that always returns zero, turning A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: &Station, _goal: &Station) -> f64 {
        0.0
    }
}

/// Great-circle travel time estimate at a fixed maximum speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicHeuristic {
    max_kmph: f64,
}

impl GeographicHeuristic {
    /// Create a heuristic for the given speed bound in km/h.
    pub fn new(max_kmph: f64) -> Result<Self> {
        if !max_kmph.is_finite() || max_kmph <= 0.0 {
            return Err(Error::InvalidHeuristicSpeed { value: max_kmph });
        }
        Ok(Self { max_kmph })
    }

    pub fn max_kmph(&self) -> f64 {
        self.max_kmph
    }
}

impl Default for GeographicHeuristic {
    fn default() -> Self {
        Self {
            max_kmph: DEFAULT_MAX_KMPH,
        }
    }
}

impl Heuristic for GeographicHeuristic {
    fn estimate(&self, from: &Station, goal: &Station) -> f64 {
        let km = haversine_km(from, goal);
        if !km.is_finite() {
            return 0.0;
        }
        km / self.max_kmph * 60.0
    }
}

/// Great-circle distance between two stations in kilometres.
pub fn haversine_km(a: &Station, b: &Station) -> f64 {
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn at(latitude: f64, longitude: f64) -> Station {
        Station {
            id: format!("{latitude},{longitude}"),
            name: String::new(),
            latitude,
            longitude,
            zones: BTreeSet::new(),
        }
    }

    #[test]
    fn same_point_is_zero() {
        let bank = at(51.5133, -0.0886);
        assert_eq!(haversine_km(&bank, &bank), 0.0);
        assert_eq!(GeographicHeuristic::default().estimate(&bank, &bank), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let km = haversine_km(&at(0.0, 0.0), &at(1.0, 0.0));
        assert!((km - 111.19).abs() < 0.01, "got {km}");
    }

    #[test]
    fn minutes_scale_with_speed() {
        let a = at(0.0, 0.0);
        let b = at(1.0, 0.0);
        let fast = GeographicHeuristic::new(120.0).unwrap().estimate(&a, &b);
        let slow = GeographicHeuristic::new(60.0).unwrap().estimate(&a, &b);
        assert!((fast - 55.6).abs() < 0.1, "got {fast}");
        assert!((slow - 2.0 * fast).abs() < 1e-9);
    }

    #[test]
    fn unknown_coordinates_estimate_zero() {
        let a = at(f64::NAN, 0.0);
        let b = at(1.0, 0.0);
        assert_eq!(GeographicHeuristic::default().estimate(&a, &b), 0.0);
    }

    #[test]
    fn rejects_non_positive_speeds() {
        for value in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GeographicHeuristic::new(value),
                Err(Error::InvalidHeuristicSpeed { .. })
            ));
        }
    }

    #[test]
    fn closures_are_heuristics() {
        let constant = |_: &Station, _: &Station| 4.0;
        assert_eq!(constant.estimate(&at(0.0, 0.0), &at(0.0, 1.0)), 4.0);
        assert_eq!(ZeroHeuristic.estimate(&at(0.0, 0.0), &at(0.0, 1.0)), 0.0);
    }
}
