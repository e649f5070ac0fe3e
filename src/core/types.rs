//! Compact tree types shared across figpress modules

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::color::HexColor;
use super::keys::{CompactKey, ICON_TYPE};

/// One node of the compressed tree.
///
/// A node is either the minimal icon record or the full element record, never
/// a mix of the two.
#[derive(Debug, Clone, PartialEq)]
pub enum CompactNode {
    Icon(IconNode),
    Element(ElementNode),
}

/// A node collapsed by icon classification. Its subtree is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconNode {
    pub name: String,
}

/// Auto-layout direction and the gap between items.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub mode: String,
    /// Kept verbatim so integral spacings stay integral in the output
    pub spacing: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    /// Aliased type tag; absent when the raw node had no usable type
    pub kind: Option<String>,
    pub name: String,
    /// Text content of text-bearing nodes
    pub value: Option<String>,
    pub layout: Option<Layout>,
    pub fill: Option<HexColor>,
    /// Never holds an explicit empty list in serialized form
    pub children: Vec<CompactNode>,
}

impl CompactNode {
    pub fn icon(name: impl Into<String>) -> Self {
        CompactNode::Icon(IconNode { name: name.into() })
    }

    pub fn name(&self) -> &str {
        match self {
            CompactNode::Icon(icon) => &icon.name,
            CompactNode::Element(el) => &el.name,
        }
    }

    /// Compact type tag (`IC` for icons).
    pub fn kind(&self) -> Option<&str> {
        match self {
            CompactNode::Icon(_) => Some(ICON_TYPE),
            CompactNode::Element(el) => el.kind.as_deref(),
        }
    }

    pub fn children(&self) -> &[CompactNode] {
        match self {
            CompactNode::Icon(_) => &[],
            CompactNode::Element(el) => &el.children,
        }
    }

    pub fn is_icon(&self) -> bool {
        matches!(self, CompactNode::Icon(_))
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(CompactNode::node_count).sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(CompactNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Serializing a tree of strings and numbers into a Value cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for CompactNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CompactNode::Icon(icon) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(CompactKey::Type.compact(), ICON_TYPE)?;
                map.serialize_entry(CompactKey::Name.compact(), &icon.name)?;
                map.end()
            }
            CompactNode::Element(el) => {
                let mut map = serializer.serialize_map(None)?;
                if let Some(kind) = &el.kind {
                    map.serialize_entry(CompactKey::Type.compact(), kind)?;
                }
                map.serialize_entry(CompactKey::Name.compact(), &el.name)?;
                if let Some(value) = &el.value {
                    map.serialize_entry(CompactKey::Characters.compact(), value)?;
                }
                if let Some(layout) = &el.layout {
                    map.serialize_entry(CompactKey::LayoutMode.compact(), &layout.mode)?;
                    if let Some(spacing) = &layout.spacing {
                        map.serialize_entry(CompactKey::ItemSpacing.compact(), spacing)?;
                    }
                }
                if let Some(fill) = &el.fill {
                    map.serialize_entry(CompactKey::Fills.compact(), fill)?;
                }
                if !el.children.is_empty() {
                    map.serialize_entry(CompactKey::Children.compact(), &el.children)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CompactRecord {
    #[serde(rename = "t")]
    kind: Option<String>,
    #[serde(rename = "n", default)]
    name: String,
    #[serde(rename = "v")]
    value: Option<String>,
    #[serde(rename = "lm")]
    layout_mode: Option<String>,
    #[serde(rename = "is")]
    item_spacing: Option<Number>,
    #[serde(rename = "f")]
    fill: Option<HexColor>,
    #[serde(rename = "c", default)]
    children: Vec<CompactNode>,
}

impl<'de> Deserialize<'de> for CompactNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = CompactRecord::deserialize(deserializer)?;

        let bare = record.value.is_none()
            && record.layout_mode.is_none()
            && record.fill.is_none()
            && record.children.is_empty();
        if record.kind.as_deref() == Some(ICON_TYPE) && bare && record.item_spacing.is_none() {
            return Ok(CompactNode::icon(record.name));
        }

        let layout = match (record.layout_mode, record.item_spacing) {
            (Some(mode), spacing) => Some(Layout { mode, spacing }),
            (None, Some(_)) => {
                return Err(de::Error::custom("`is` present without `lm`"));
            }
            (None, None) => None,
        };

        Ok(CompactNode::Element(ElementNode {
            kind: record.kind,
            name: record.name,
            value: record.value,
            layout,
            fill: record.fill,
            children: record.children,
        }))
    }
}
