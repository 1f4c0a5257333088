#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One accepted angle/distance reading.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Sensor angle in degrees. Expected in 0..=180 but not enforced.
    pub angle_degree: i32,
    /// Distance to an object in cm.
    pub distance: f64,
}

impl Measurement {
    pub fn new(angle_degree: i32, distance: f64) -> Measurement {
        Measurement {
            angle_degree,
            distance,
        }
    }
}
