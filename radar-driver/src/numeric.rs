pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// Converts a polar point into screen coordinates where 0 rad points right
/// and angles grow counter-clockwise.
pub fn polar_to_cartesian(angle_radian: f64, distance: f64) -> (f64, f64) {
    (
        distance * f64::cos(angle_radian),
        distance * f64::sin(angle_radian),
    )
}

pub(crate) fn to_string(data: &[u8]) -> String {
    data.iter()
        .map(|e| format!("{:02X}", e))
        .collect::<Vec<_>>()
        .join(" ")
}
