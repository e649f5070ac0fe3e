//! Key and value dictionaries for the compact tree
//!
//! The key dictionary is closed: every raw field the compressor understands has
//! exactly one short name. The value tables are open: unknown values pass
//! through verbatim.

/// Raw design-tool field names and their compact spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompactKey {
    Type,
    Name,
    Children,
    Characters,
    LayoutMode,
    ItemSpacing,
    Fills,
    CornerRadius,
    PaddingLeft,
    PaddingTop,
}

impl CompactKey {
    pub const ALL: [CompactKey; 10] = [
        CompactKey::Type,
        CompactKey::Name,
        CompactKey::Children,
        CompactKey::Characters,
        CompactKey::LayoutMode,
        CompactKey::ItemSpacing,
        CompactKey::Fills,
        CompactKey::CornerRadius,
        CompactKey::PaddingLeft,
        CompactKey::PaddingTop,
    ];

    /// Field name as it appears in the design-tool document
    pub fn raw(&self) -> &'static str {
        match self {
            CompactKey::Type => "type",
            CompactKey::Name => "name",
            CompactKey::Children => "children",
            CompactKey::Characters => "characters",
            CompactKey::LayoutMode => "layoutMode",
            CompactKey::ItemSpacing => "itemSpacing",
            CompactKey::Fills => "fills",
            CompactKey::CornerRadius => "cornerRadius",
            CompactKey::PaddingLeft => "paddingLeft",
            CompactKey::PaddingTop => "paddingTop",
        }
    }

    /// Field name as it appears in the compact tree
    pub fn compact(&self) -> &'static str {
        match self {
            CompactKey::Type => "t",
            CompactKey::Name => "n",
            CompactKey::Children => "c",
            CompactKey::Characters => "v",
            CompactKey::LayoutMode => "lm",
            CompactKey::ItemSpacing => "is",
            CompactKey::Fills => "f",
            CompactKey::CornerRadius => "cr",
            CompactKey::PaddingLeft => "pl",
            CompactKey::PaddingTop => "pt",
        }
    }
}

/// Type tag the design tool uses for primitive vector shapes.
pub const VECTOR_TYPE: &str = "VECTOR";

/// Paint type tag for flat colors.
pub const SOLID_PAINT: &str = "SOLID";

/// Compact type value for nodes collapsed by icon classification.
pub const ICON_TYPE: &str = "IC";

/// Short alias for a node type tag, if one exists.
pub fn type_alias(raw: &str) -> Option<&'static str> {
    match raw {
        "FRAME" => Some("FR"),
        "TEXT" => Some("TX"),
        VECTOR_TYPE => Some(ICON_TYPE),
        _ => None,
    }
}

/// Short alias for an auto-layout direction, if one exists.
pub fn layout_alias(raw: &str) -> Option<&'static str> {
    match raw {
        "HORIZONTAL" => Some("H"),
        "VERTICAL" => Some("V"),
        _ => None,
    }
}

/// Compact node type, falling back to the raw tag for unknown vocabulary.
pub fn compact_type(raw: &str) -> String {
    type_alias(raw).unwrap_or(raw).to_string()
}

/// Compact layout mode, falling back to the raw value for unknown modes.
pub fn compact_layout(raw: &str) -> String {
    layout_alias(raw).unwrap_or(raw).to_string()
}

/// `(compact, raw)` pairs describing every short key, in dictionary order.
pub fn legend() -> Vec<(&'static str, &'static str)> {
    CompactKey::ALL
        .iter()
        .map(|k| (k.compact(), k.raw()))
        .collect()
}
