pub mod measurement;
pub mod sweep;

pub use measurement::Measurement;
pub use sweep::Sweep;
