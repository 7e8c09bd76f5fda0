//! Renderer settings
//!
//! Settings are plain serde structs so they can be embedded in a larger
//! settings file or loaded from TOML on their own:
//!
//! ```toml
//! [json]
//! indent = 2
//!
//! [text]
//! charset = "utf-8"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for the built-in renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
	pub json: JsonConfig,
	pub text: TextConfig,
}

/// JSON renderer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
	/// Pretty-print with this many spaces; compact output when unset
	pub indent: Option<usize>,
}

/// Settings shared by the text based renderers (YAML, HTML, plain text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
	pub charset: String,
}

impl Default for TextConfig {
	fn default() -> Self {
		Self {
			charset: "utf-8".to_string(),
		}
	}
}

impl RenderConfig {
	/// Parses settings from a TOML document; missing keys take their defaults
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::RenderConfig;
	///
	/// let config = RenderConfig::from_toml_str("[json]\nindent = 4\n").unwrap();
	/// assert_eq!(config.json.indent, Some(4));
	/// assert_eq!(config.text.charset, "utf-8");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config = toml::from_str(source)?;
		tracing::debug!(?config, "loaded render config");
		Ok(config)
	}
}
