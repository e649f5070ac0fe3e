//! Design-tree compression engine
//!
//! Turns a raw design-tool node into a [`CompactNode`], or `None` when nothing
//! of it survives. Rules are applied in a fixed order for every node:
//!
//! 1. hidden nodes (`visible: false`) vanish with their whole subtree
//! 2. icons (vector shapes or names containing "icon") collapse to `{t, n}`
//!    and their children are never visited
//! 3. unstyled single-child wrappers are replaced by their child's result
//! 4. everything else becomes a full element record with compressed children
//!
//! The pass is pure: it never mutates the input, performs no I/O and never
//! fails. Malformed or missing fields degrade to "feature absent".

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::color::HexColor;
use super::keys::{self, CompactKey};
use super::types::{CompactNode, ElementNode, Layout};

lazy_static! {
    static ref LEADING_ICON_TOKEN: Regex =
        Regex::new(r"(?i)^(?:\s*\bicon\b\s*[/-]?\s*)+").unwrap();
    static ref TRAILING_ICON_TOKEN: Regex =
        Regex::new(r"(?i)(?:\s*[/-]?\s*\bicon\b\s*/?\s*)+$").unwrap();
}

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Tuning knobs for a compression pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Nodes nested deeper than this are elided instead of recursed into
    pub max_depth: usize,
    /// Clamp color channels into `[0, 1]` before quantizing
    pub clamp_colors: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            clamp_colors: false,
        }
    }
}

/// Counters collected during one compression pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Raw nodes inspected
    pub visited: usize,
    /// Nodes dropped because `visible` was false
    pub hidden: usize,
    /// Nodes collapsed to icon records
    pub icons: usize,
    /// Wrappers replaced by their only child
    pub flattened: usize,
    /// Nodes dropped by the depth guard
    pub truncated: usize,
    /// Nodes present in the output tree
    pub emitted: usize,
}

impl CompressionStats {
    /// Share of visited raw nodes that did not make it into the output.
    pub fn reduction_ratio(&self) -> f64 {
        if self.visited == 0 {
            return 0.0;
        }
        1.0 - self.emitted as f64 / self.visited as f64
    }
}

impl std::ops::AddAssign for CompressionStats {
    fn add_assign(&mut self, other: Self) {
        self.visited += other.visited;
        self.hidden += other.hidden;
        self.icons += other.icons;
        self.flattened += other.flattened;
        self.truncated += other.truncated;
        self.emitted += other.emitted;
    }
}

/// Reduces raw Figma nodes to [`CompactNode`] trees.
///
/// Styling capture is limited to the first fill, and only when it is a solid
/// paint. Gradients, image fills and stacked paints leave no `f` on the output;
/// use the CSS formatter when the full paint stack matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compressor {
    options: CompressOptions,
}

impl Compressor {
    pub fn new(options: CompressOptions) -> Self {
        Self { options }
    }

    pub fn compress(&self, node: &Value) -> Option<CompactNode> {
        self.compress_with_stats(node).0
    }

    pub fn compress_with_stats(&self, node: &Value) -> (Option<CompactNode>, CompressionStats) {
        let mut stats = CompressionStats::default();
        let compact = self.curate(node, 0, &mut stats);
        (compact, stats)
    }

    fn curate(&self, node: &Value, depth: usize, stats: &mut CompressionStats) -> Option<CompactNode> {
        // Anything that is not a record counts as an absent node
        let fields = node.as_object()?;
        stats.visited += 1;

        if matches!(fields.get("visible"), Some(Value::Bool(false))) {
            stats.hidden += 1;
            return None;
        }
        if depth >= self.options.max_depth {
            stats.truncated += 1;
            return None;
        }

        let name = str_field(fields, CompactKey::Name).unwrap_or_default();
        let raw_type = str_field(fields, CompactKey::Type);

        if is_icon(raw_type, name) {
            stats.icons += 1;
            stats.emitted += 1;
            return Some(CompactNode::icon(clean_icon_name(name)));
        }

        let children = fields
            .get(CompactKey::Children.raw())
            .and_then(Value::as_array)
            .map(Vec::as_slice);

        if !has_styling(fields) {
            if let Some([only]) = children {
                stats.flattened += 1;
                return self.curate(only, depth + 1, stats);
            }
        }

        let element = ElementNode {
            kind: raw_type.map(keys::compact_type),
            name: name.to_string(),
            value: str_field(fields, CompactKey::Characters).map(str::to_string),
            layout: layout(fields),
            fill: solid_fill(fields, self.options.clamp_colors),
            children: children
                .unwrap_or_default()
                .iter()
                .filter_map(|child| self.curate(child, depth + 1, stats))
                .collect(),
        };
        stats.emitted += 1;
        Some(CompactNode::Element(element))
    }
}

/// Compresses a raw node with default options.
pub fn compress(node: &Value) -> Option<CompactNode> {
    Compressor::default().compress(node)
}

fn str_field(fields: &Map<String, Value>, key: CompactKey) -> Option<&str> {
    fields.get(key.raw()).and_then(Value::as_str)
}

fn is_icon(raw_type: Option<&str>, name: &str) -> bool {
    raw_type == Some(keys::VECTOR_TYPE) || name.to_lowercase().contains("icon")
}

/// Strips leading and trailing "icon" words (with an optional slash or hyphen)
/// from a layer name, e.g. `"Icon / Close"` -> `"Close"`, `"arrow icon"` ->
/// `"arrow"`. Words that merely contain "icon", like `"Lexicon"`, are kept.
pub fn clean_icon_name(name: &str) -> String {
    let name = LEADING_ICON_TOKEN.replace(name, "");
    let name = TRAILING_ICON_TOKEN.replace(&name, "");
    name.trim().to_string()
}

fn has_styling(fields: &Map<String, Value>) -> bool {
    let has_fills = fields
        .get(CompactKey::Fills.raw())
        .and_then(Value::as_array)
        .is_some_and(|fills| !fills.is_empty());
    let has_radius = fields
        .get(CompactKey::CornerRadius.raw())
        .and_then(Value::as_f64)
        .is_some_and(|radius| radius != 0.0);
    has_fills || has_radius
}

fn layout(fields: &Map<String, Value>) -> Option<Layout> {
    let mode = str_field(fields, CompactKey::LayoutMode).filter(|m| !m.is_empty())?;
    let spacing = match fields.get(CompactKey::ItemSpacing.raw()) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    };
    Some(Layout {
        mode: keys::compact_layout(mode),
        spacing,
    })
}

/// Hex color of the first paint, only when that paint is solid. Other paints
/// and any further entries are not represented.
fn solid_fill(fields: &Map<String, Value>, clamp: bool) -> Option<HexColor> {
    let first = fields.get(CompactKey::Fills.raw())?.as_array()?.first()?;
    if first.get("type").and_then(Value::as_str) != Some(keys::SOLID_PAINT) {
        return None;
    }
    HexColor::from_value(first.get("color")?, clamp)
}
