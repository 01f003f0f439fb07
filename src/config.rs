//! Render configuration.
//!
//! ```toml
//! background = "#1e1e2e"
//! fill = "#ffffff"
//! encoding = "ansi"
//! ```
//!
//! Every field is optional; missing ones fall back to [`RenderConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Rgba;

/// How a rendered frame is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Characters plus ANSI color/attribute escape sequences.
    #[default]
    Ansi,
    /// Characters only.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas background before anything is drawn.
    #[serde(with = "color")]
    pub background: Rgba,

    /// Fill color in effect when the root view starts rendering. Shapes
    /// and text without a color of their own use it.
    #[serde(with = "color")]
    pub fill: Rgba,

    pub encoding: Encoding,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Rgba::TERMINAL_DEFAULT,
            fill: Rgba::WHITE,
            encoding: Encoding::Ansi,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        tracing::debug!(?config, "loaded render config");
        Ok(config)
    }
}

/// Colors are written as strings `Rgba::parse` understands.
mod color {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::types::Rgba;

    pub(super) fn serialize<S: Serializer>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgba::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid color: {raw:?}")))
    }
}
