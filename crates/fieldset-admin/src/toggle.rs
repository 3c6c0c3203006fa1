//! Checkbox wire-format coercion.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// A boolean flag as submitted by the administration form.
///
/// HTML checkboxes arrive as the string `"on"`, JSON clients send real
/// booleans, and unchecked boxes are absent or null. All of these
/// collapse to a strict `bool` at this boundary; any other value is
/// false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ToggleWire")]
pub struct Toggle(bool);

impl Toggle {
    pub const fn as_bool(self) -> bool {
        self.0
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToggleWire {
    Flag(bool),
    Text(String),
    Other(IgnoredAny),
}

impl From<ToggleWire> for Toggle {
    fn from(wire: ToggleWire) -> Self {
        match wire {
            ToggleWire::Flag(value) => Self(value),
            ToggleWire::Text(text) => Self(text == "on"),
            ToggleWire::Other(_) => Self(false),
        }
    }
}
