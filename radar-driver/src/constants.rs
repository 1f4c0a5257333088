pub(crate) const MESSAGE_DELIMITER: u8 = b'\n';
pub(crate) const ANGLE_MARKER: &str = "Angle";
pub(crate) const DISTANCE_MARKER: &str = "Distance";
pub(crate) const FIELD_SEPARATOR: char = ':';
pub(crate) const ANGLE_TERMINATOR: char = ',';
pub(crate) const DISTANCE_UNIT: &str = "cm";
// One point per 10 degree step over a half rotation, plus the closing one
pub(crate) const DEFAULT_SWEEP_CAPACITY: usize = 19;
pub(crate) const DEFAULT_MAX_RANGE: f64 = 100.;
pub(crate) const DEFAULT_CHUNK_SIZE: usize = 1024;
pub(crate) const DEFAULT_FRAME_PAUSE_MS: u64 = 10;
pub(crate) const DEFAULT_INDICATOR_DEGREE: f64 = 90.;
pub(crate) const ACCEPT_POLL_MS: u64 = 50;
pub(crate) const DEFAULT_SERIAL_TIMEOUT_MS: u64 = 1000;
