use std::collections::HashMap;

use tracing::debug;

use crate::color::normalize;
use crate::error::Result;

/// Hex returned for names the table does not know.
pub const FALLBACK_HEX: &str = "#cccccc";

const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("rojo", "#ff0000"),
    ("azul", "#0000ff"),
    ("verde", "#00ff00"),
    ("amarillo", "#ffff00"),
    ("violeta", "#800080"),
    ("naranja", "#ffa500"),
    ("rosa", "#ffc0cb"),
    ("negro", "#000000"),
    ("blanco", "#ffffff"),
    ("gris", "#808080"),
    ("marron", "#a52a2a"),
    ("morado", "#800080"),
    ("celeste", "#87ceeb"),
    ("turquesa", "#40e0d0"),
    ("dorado", "#ffd700"),
    ("plateado", "#c0c0c0"),
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("green", "#00ff00"),
    ("yellow", "#ffff00"),
    ("purple", "#800080"),
    ("violet", "#800080"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("brown", "#a52a2a"),
    ("turquoise", "#40e0d0"),
    ("gold", "#ffd700"),
    ("silver", "#c0c0c0"),
    ("sky-blue", "#87ceeb"),
    ("sky blue", "#87ceeb"),
    ("skyblue", "#87ceeb"),
];

/// Maps color names to hex. Unknown names resolve to a neutral fallback
/// instead of failing.
#[derive(Debug, Clone)]
pub struct NameResolver {
    table: HashMap<String, String>,
    fallback: String,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self {
            table: BUILTIN_NAMES
                .iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string()))
                .collect(),
            fallback: FALLBACK_HEX.to_string(),
        }
    }
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace entries. Names are matched case- and
    /// whitespace-insensitively; every hex is validated.
    pub fn with_overrides<'a, I>(mut self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, hex) in entries {
            self.table.insert(name.trim().to_lowercase(), normalize(hex)?);
        }
        Ok(self)
    }

    /// Replace the hex used for unknown names.
    pub fn with_fallback(mut self, hex: &str) -> Result<Self> {
        self.fallback = normalize(hex)?;
        Ok(self)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Whether `name` is in the table.
    pub fn knows(&self, name: &str) -> bool {
        self.table.contains_key(&name.trim().to_lowercase())
    }

    /// Resolve a name to canonical hex. Never fails.
    pub fn resolve(&self, name: &str) -> String {
        let key = name.trim().to_lowercase();
        let hex = self.table.get(&key).unwrap_or(&self.fallback).clone();
        debug!(name = %key, %hex, "resolved color name");
        hex
    }
}
