//! Lossy `#rrggbb` quantization of design-tool colors
//!
//! Channels arrive as fractions in `[0, 1]`. Alpha is dropped. Out-of-range
//! channels are not rejected: they quantize to whatever the formula yields
//! unless clamping is requested.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A quantized color as rendered into the compact tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Quantizes three fractional channels.
    pub fn from_channels(r: f64, g: f64, b: f64, clamp: bool) -> Self {
        let hex = [r, g, b]
            .into_iter()
            .map(|c| channel_hex(if clamp { c.clamp(0.0, 1.0) } else { c }))
            .collect::<String>();
        HexColor(format!("#{}", hex))
    }

    /// Reads a `{r, g, b}` record. Returns `None` unless all three channels
    /// are numbers.
    pub fn from_value(color: &Value, clamp: bool) -> Option<Self> {
        let channel = |name: &str| color.get(name).and_then(Value::as_f64);
        Some(Self::from_channels(
            channel("r")?,
            channel("g")?,
            channel("b")?,
            clamp,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for HexColor {
    fn from(s: String) -> Self {
        HexColor(s)
    }
}

/// Scales a channel to 0..=255, rounds half up, and renders lowercase hex
/// padded to two digits. Negative results keep their sign.
fn channel_hex(channel: f64) -> String {
    let scaled = (channel * 255.0 + 0.5).floor() as i64;
    let digits = if scaled < 0 {
        format!("-{:x}", scaled.unsigned_abs())
    } else {
        format!("{:x}", scaled)
    };
    format!("{:0>2}", digits)
}
