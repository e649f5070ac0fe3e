//! CSS backgrounds from raw Figma paints
//!
//! Works on the uncompressed node, so it sees every paint (gradients and
//! stacked fills included) rather than the single color kept in the compact
//! tree.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PaintColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HandlePosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradientStop {
    pub color: PaintColor,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub blend_mode: Option<String>,
    #[serde(default)]
    pub color: Option<PaintColor>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub gradient_handle_positions: Vec<HandlePosition>,
    #[serde(default)]
    pub gradient_stops: Vec<GradientStop>,
}

/// One converted paint layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub background: String,
    pub mix_blend_mode: Option<&'static str>,
}

/// CSS background declarations for a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackgroundCss {
    pub background: Option<String>,
    pub background_image: Option<String>,
    pub mix_blend_mode: Option<String>,
    pub background_blend_mode: Option<String>,
}

impl BackgroundCss {
    /// `(property, value)` pairs with kebab-case property names.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        [
            ("background", &self.background),
            ("background-image", &self.background_image),
            ("mix-blend-mode", &self.mix_blend_mode),
            ("background-blend-mode", &self.background_blend_mode),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }
}

/// Rounds half up, matching the design tool's own rounding.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// `rgba(r, g, b, a)`; an explicit paint opacity replaces the color alpha.
pub fn color_to_rgba(color: &PaintColor, opacity: Option<f64>) -> String {
    let r = round_half_up(color.r * 255.0);
    let g = round_half_up(color.g * 255.0);
    let b = round_half_up(color.b * 255.0);
    let a = opacity.unwrap_or(color.a);
    format!("rgba({}, {}, {}, {})", r, g, b, a)
}

/// CSS angle (0deg = up, 90deg = right) from the first two gradient handles.
pub fn gradient_angle(handles: &[HandlePosition]) -> i64 {
    let [start, end, ..] = handles else {
        return 0;
    };
    let degrees = (end.y - start.y).atan2(end.x - start.x).to_degrees();
    round_half_up((degrees + 90.0) % 360.0)
}

fn gradient_stops(stops: &[GradientStop]) -> String {
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
    sorted
        .iter()
        .map(|stop| {
            format!(
                "{} {}%",
                color_to_rgba(&stop.color, None),
                round_half_up(stop.position * 100.0)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn blend_mode(mode: Option<&str>) -> &'static str {
    match mode.unwrap_or_default() {
        "MULTIPLY" => "multiply",
        "SCREEN" => "screen",
        "OVERLAY" => "overlay",
        "DARKEN" => "darken",
        "LIGHTEN" => "lighten",
        "COLOR_DODGE" => "color-dodge",
        "COLOR_BURN" => "color-burn",
        "HARD_LIGHT" => "hard-light",
        "SOFT_LIGHT" => "soft-light",
        "DIFFERENCE" => "difference",
        "EXCLUSION" => "exclusion",
        "HUE" => "hue",
        "SATURATION" => "saturation",
        "COLOR" => "color",
        "LUMINOSITY" => "luminosity",
        _ => "normal",
    }
}

pub fn convert_paint(paint: &Paint) -> Layer {
    let blend = blend_mode(paint.blend_mode.as_deref());
    let mix_blend_mode = (blend != "normal").then_some(blend);

    let background = match paint.kind.as_str() {
        "SOLID" => match &paint.color {
            Some(color) => color_to_rgba(color, paint.opacity),
            None => "transparent".to_string(),
        },
        "GRADIENT_LINEAR" => format!(
            "linear-gradient({}deg, {})",
            gradient_angle(&paint.gradient_handle_positions),
            gradient_stops(&paint.gradient_stops)
        ),
        "GRADIENT_RADIAL" => format!("radial-gradient(circle, {})", gradient_stops(&paint.gradient_stops)),
        "GRADIENT_ANGULAR" => format!("conic-gradient({})", gradient_stops(&paint.gradient_stops)),
        // No diamond gradient in CSS; an ellipse is the closest match
        "GRADIENT_DIAMOND" => format!("radial-gradient(ellipse, {})", gradient_stops(&paint.gradient_stops)),
        other if other.starts_with("GRADIENT_") => {
            format!("linear-gradient(0deg, {})", gradient_stops(&paint.gradient_stops))
        }
        _ => {
            return Layer {
                background: "transparent".to_string(),
                mix_blend_mode: None,
            };
        }
    };

    Layer {
        background,
        mix_blend_mode,
    }
}

/// Converts a paint stack. A leading solid paint becomes `background`, the
/// rest are layered into `background-image`.
pub fn convert_paints(paints: &[Paint], fallback: Option<&PaintColor>) -> BackgroundCss {
    match paints {
        [] => BackgroundCss {
            background: Some(
                fallback
                    .map(|c| color_to_rgba(c, None))
                    .unwrap_or_else(|| "transparent".to_string()),
            ),
            ..Default::default()
        },
        [single] => {
            let layer = convert_paint(single);
            BackgroundCss {
                background: Some(layer.background),
                mix_blend_mode: layer.mix_blend_mode.map(str::to_string),
                ..Default::default()
            }
        }
        [first, ..] => {
            let converted: Vec<Layer> = paints.iter().map(convert_paint).collect();
            let blend_modes: Vec<&str> = converted.iter().filter_map(|l| l.mix_blend_mode).collect();
            let mut layers: Vec<String> = converted.into_iter().map(|l| l.background).collect();

            let mut css = BackgroundCss::default();
            if first.kind == "SOLID" {
                if let Some(color) = &first.color {
                    css.background = Some(color_to_rgba(color, first.opacity));
                    layers.remove(0);
                }
            }
            if !layers.is_empty() {
                css.background_image = Some(layers.join(", "));
            }
            if !blend_modes.is_empty() {
                css.background_blend_mode = Some(blend_modes.join(", "));
            }
            css
        }
    }
}

/// Background CSS for a raw node, reading `background` before `fills` and
/// `backgroundColor` as the fallback. Paints that cannot be read are skipped.
pub fn node_background(node: &Value) -> BackgroundCss {
    let paints: Vec<Paint> = node
        .get("background")
        .or_else(|| node.get("fills"))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match Paint::deserialize(entry) {
                    Ok(paint) => Some(paint),
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping unreadable paint");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let fallback = node
        .get("backgroundColor")
        .and_then(|c| PaintColor::deserialize(c).ok());

    convert_paints(&paints, fallback.as_ref())
}
