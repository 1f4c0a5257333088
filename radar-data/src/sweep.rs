#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::measurement::Measurement;

/// Struct to hold the points of one (possibly partial) angular sweep.
///
/// The vectors are parallel and kept in arrival order.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sweep {
    /// Scan angle in radian.
    pub angles_radian: Vec<f64>,
    /// Distance to an object in cm.
    pub distances: Vec<f64>,
    /// Scan angle in degrees as received.
    pub angles_degree: Vec<i32>,
}

impl Sweep {
    pub fn new() -> Sweep {
        Sweep::default()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Measurements in arrival order, rebuilt from the raw columns.
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        self.angles_degree
            .iter()
            .zip(self.distances.iter())
            .map(|(a, d)| Measurement::new(*a, *d))
    }

    /// Angle in radian of the most recent point, if any.
    pub fn latest_angle_radian(&self) -> Option<f64> {
        self.angles_radian.last().copied()
    }

    pub fn clear(&mut self) {
        self.angles_radian.clear();
        self.distances.clear();
        self.angles_degree.clear();
    }
}
