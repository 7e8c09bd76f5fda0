use serde_json::Value;

use crate::config::TextConfig;
use crate::error::Result;
use crate::renderer::{Rendered, Renderer, RendererContext};

/// Renderer for pre-built text such as static HTML or plain text bodies
///
/// A string payload is emitted verbatim; any other payload is emitted as its
/// JSON text. `null` renders as an empty string.
#[derive(Debug, Clone)]
pub struct TextRenderer {
	media_type: String,
	format: String,
	charset: String,
}

impl TextRenderer {
	/// Renderer for `text/html` bodies that are already HTML
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::{Renderer, TextRenderer};
	///
	/// let renderer = TextRenderer::html();
	/// assert_eq!(renderer.media_type(), "text/html");
	/// assert_eq!(renderer.format(), Some("html"));
	/// ```
	pub fn html() -> Self {
		Self::new("text/html", "html")
	}

	/// Renderer for `text/plain` bodies
	pub fn plain() -> Self {
		Self::new("text/plain", "txt")
	}

	pub fn new(media_type: impl Into<String>, format: impl Into<String>) -> Self {
		Self {
			media_type: media_type.into(),
			format: format.into(),
			charset: TextConfig::default().charset,
		}
	}

	/// Applies the shared text settings
	pub fn with_config(mut self, config: &TextConfig) -> Self {
		self.charset = config.charset.clone();
		self
	}
}

impl Renderer for TextRenderer {
	fn media_type(&self) -> &str {
		&self.media_type
	}

	fn format(&self) -> Option<&str> {
		Some(&self.format)
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
		let text = match data {
			Value::Null => String::new(),
			Value::String(s) => s.clone(),
			other => other.to_string(),
		};
		Ok(Rendered::Text(text))
	}
}
