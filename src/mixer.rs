use chrono::Local;
use tracing::debug;

use crate::color::{normalize, Color};
use crate::error::Result;
use crate::record::ColorRecord;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of mixing two colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixResult {
    /// Canonical form of the first input.
    pub first: String,
    /// Canonical form of the second input.
    pub second: String,
    pub mixed: String,
    pub created_at: String,
}

impl MixResult {
    /// Turn the mix into a storable record with a fresh id.
    pub fn into_record(self) -> ColorRecord {
        let mut record = ColorRecord::new(self.mixed);
        record.source_inputs = vec![self.first, self.second];
        record.created_at = Some(self.created_at);
        record
    }
}

/// Average two colors channel by channel.
///
/// Each output channel is `round((a + b) / 2)` with halves rounded up, so the
/// result does not depend on argument order.
pub fn mix_colors(a: Color, b: Color) -> Color {
    let avg = |x: u8, y: u8| (x as i32 + y as i32 + 1) / 2;
    Color::from_clamped(avg(a.r, b.r), avg(a.g, b.g), avg(a.b, b.b))
}

/// Mix two hex strings into a canonical hex string. Both inputs are validated
/// before any arithmetic.
pub fn mix_hex(a: &str, b: &str) -> Result<String> {
    let first = Color::from_hex(a)?;
    let second = Color::from_hex(b)?;
    Ok(mix_colors(first, second).to_hex())
}

/// Mix two hex strings and stamp the result with the local time.
pub fn mix(a: &str, b: &str) -> Result<MixResult> {
    let first = normalize(a)?;
    let second = normalize(b)?;
    let mixed = mix_hex(&first, &second)?;
    debug!(%first, %second, %mixed, "mixed colors");
    Ok(MixResult {
        first,
        second,
        mixed,
        created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
    })
}
