use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Caption layout tag. The two known layouts get their own variants;
/// anything else is handed to the render engine uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionStyle {
    Top,
    Bottom,
    Custom(String),
}

impl CaptionStyle {
    pub fn as_str(&self) -> &str {
        match self {
            CaptionStyle::Top => "top",
            CaptionStyle::Bottom => "bottom",
            CaptionStyle::Custom(tag) => tag,
        }
    }
}

impl Default for CaptionStyle {
    fn default() -> Self {
        CaptionStyle::Bottom
    }
}

impl From<&str> for CaptionStyle {
    fn from(tag: &str) -> Self {
        match tag {
            "top" => CaptionStyle::Top,
            "bottom" => CaptionStyle::Bottom,
            other => CaptionStyle::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CaptionStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CaptionStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(CaptionStyle::from(tag.as_str()))
    }
}
