use serde_json::Value;

use crate::config::TextConfig;
use crate::error::Result;
use crate::renderer::{Rendered, Renderer, RendererContext};

/// YAML renderer
///
/// Renders JSON data as YAML text, leaving the encoding to the response.
#[derive(Debug, Clone)]
pub struct YAMLRenderer {
	pub charset: String,
}

impl Default for YAMLRenderer {
	fn default() -> Self {
		Self::from_config(&TextConfig::default())
	}
}

impl YAMLRenderer {
	/// Creates a YAML renderer emitting UTF-8
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::{Renderer, YAMLRenderer};
	///
	/// let renderer = YAMLRenderer::new();
	/// assert_eq!(renderer.charset(), Some("utf-8"));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_config(config: &TextConfig) -> Self {
		Self {
			charset: config.charset.clone(),
		}
	}
}

impl Renderer for YAMLRenderer {
	fn media_type(&self) -> &str {
		"application/yaml"
	}

	fn format(&self) -> Option<&str> {
		Some("yaml")
	}

	fn charset(&self) -> Option<&str> {
		Some(&self.charset)
	}

	fn render(
		&self,
		data: &Value,
		_media_type: &str,
		_context: &RendererContext,
	) -> Result<Rendered> {
		Ok(Rendered::Text(serde_yaml::to_string(data)?))
	}
}
