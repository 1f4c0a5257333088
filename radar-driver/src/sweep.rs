use crate::numeric::degree_to_radian;
use radar_data::{Measurement, Sweep};

/// Result of pushing one measurement into a [`SweepBuffer`].
#[derive(Clone, Debug, PartialEq)]
pub enum SweepEvent {
    /// The measurement was appended. `len` is the new sweep length.
    Appended { len: usize },
    /// The sweep overflowed its capacity and was cleared.
    Reset { completed: usize },
}

/// Bounded buffer holding the sweep in progress.
///
/// Capacity is fixed at construction and is not inferred from the observed
/// angles: a sensor emitting more or fewer points per half rotation resets
/// late or early.
#[derive(Debug)]
pub struct SweepBuffer {
    sweep: Sweep,
    capacity: usize,
    completed: usize,
}

impl SweepBuffer {
    pub fn new(capacity: usize) -> SweepBuffer {
        SweepBuffer {
            sweep: Sweep {
                angles_radian: Vec::with_capacity(capacity + 1),
                distances: Vec::with_capacity(capacity + 1),
                angles_degree: Vec::with_capacity(capacity + 1),
            },
            capacity,
            completed: 0,
        }
    }

    pub fn push(&mut self, measurement: Measurement) -> SweepEvent {
        let angle_radian = degree_to_radian(measurement.angle_degree as f64);
        self.sweep.angles_radian.push(angle_radian);
        self.sweep.distances.push(measurement.distance);
        self.sweep.angles_degree.push(measurement.angle_degree);

        if self.sweep.len() > self.capacity {
            self.sweep.clear();
            self.completed += 1;
            return SweepEvent::Reset {
                completed: self.completed,
            };
        }
        SweepEvent::Appended {
            len: self.sweep.len(),
        }
    }

    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    pub fn len(&self) -> usize {
        self.sweep.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sweep.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resets since the buffer was created.
    pub fn completed_sweeps(&self) -> usize {
        self.completed
    }
}
