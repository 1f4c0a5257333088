use crate::constants::{
    ANGLE_MARKER, ANGLE_TERMINATOR, DISTANCE_MARKER, DISTANCE_UNIT, FIELD_SEPARATOR,
};
use crate::error::{Field, ParseError};
use radar_data::Measurement;

/// Parses one complete message such as `Angle: 45, Distance: 12.5cm`.
///
/// Returns `Ok(None)` when the message does not carry both markers; such
/// messages are not measurements and are not an error either.
pub fn parse_message(message: &str) -> Result<Option<Measurement>, ParseError> {
    let (angle_start, distance_start) = match (
        message.find(ANGLE_MARKER),
        message.find(DISTANCE_MARKER),
    ) {
        (Some(a), Some(d)) => (a, d),
        _ => return Ok(None),
    };

    let angle_text = field_value(message, angle_start + ANGLE_MARKER.len(), Field::Angle)?;
    let angle_text = match angle_text.find(ANGLE_TERMINATOR) {
        Some(end) => &angle_text[..end],
        None => angle_text,
    };
    // the angle never runs into the distance field, even without a comma
    let angle_text = match angle_text.find(DISTANCE_MARKER) {
        Some(end) => &angle_text[..end],
        None => angle_text,
    };
    let angle_degree = parse_angle(angle_text)?;

    let distance_text = field_value(
        message,
        distance_start + DISTANCE_MARKER.len(),
        Field::Distance,
    )?;
    let distance = parse_distance(distance_text)?;

    Ok(Some(Measurement::new(angle_degree, distance)))
}

/// Returns the text after the separator that follows a marker.
fn field_value(message: &str, marker_end: usize, field: Field) -> Result<&str, ParseError> {
    let rest = message[marker_end..].trim_start();
    match rest.strip_prefix(FIELD_SEPARATOR) {
        Some(value) => Ok(value),
        None => Err(ParseError::MissingSeparator(field)),
    }
}

fn parse_angle(text: &str) -> Result<i32, ParseError> {
    let text = text.trim();
    text.parse::<i32>()
        .map_err(|_| ParseError::InvalidAngle(text.to_string()))
}

fn parse_distance(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    let number = text.strip_suffix(DISTANCE_UNIT).unwrap_or(text).trim();
    match number.parse::<f64>() {
        Ok(d) if d.is_finite() => Ok(d),
        _ => Err(ParseError::InvalidDistance(text.to_string())),
    }
}
