use crate::core::{Address, Coordinates, PassRecord};
use crate::utils::error::{FlyoverError, Result};
use chrono::{DateTime, Utc};

/// Absolute start of a pass: the Unix epoch plus `risetime` seconds.
pub fn rise_datetime(pass: &PassRecord) -> Result<DateTime<Utc>> {
    i64::try_from(pass.risetime)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| FlyoverError::Parse {
            context: "pass risetime".to_string(),
            message: format!("{} is outside the representable time range", pass.risetime),
        })
}

pub fn format_pass(pass: &PassRecord) -> Result<String> {
    let datetime = rise_datetime(pass)?;
    Ok(format!(
        "Next pass at {} for {} seconds!",
        datetime, pass.duration
    ))
}

pub fn render_passes(passes: &[PassRecord]) -> Result<Vec<String>> {
    passes.iter().map(format_pass).collect()
}

pub fn render_json(passes: &[PassRecord]) -> Result<String> {
    serde_json::to_string_pretty(passes).map_err(|e| FlyoverError::parse("pass output", e))
}

pub fn format_address(address: &Address) -> String {
    format!("Your public IP address is {}", address)
}

pub fn format_coordinates(coordinates: &Coordinates) -> String {
    format!(
        "Approximate location: latitude {}, longitude {}",
        coordinates.latitude, coordinates.longitude
    )
}

/// Stdout line for a failed lookup.
pub fn format_failure(e: &FlyoverError) -> String {
    format!("It didn't work! {}", e)
}

/// Upstream failures are reported and the process still exits normally;
/// configuration problems exit with 1.
pub fn failure_exit_code(e: &FlyoverError) -> i32 {
    if e.is_upstream() {
        0
    } else {
        1
    }
}
