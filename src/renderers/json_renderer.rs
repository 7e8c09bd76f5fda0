use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::JsonConfig;
use crate::error::Result;
use crate::renderer::{Rendered, Renderer, RendererContext};

/// Largest indentation honored from any source
pub const MAX_INDENT: usize = 8;

/// JSON renderer
///
/// Emits UTF-8 JSON bytes directly, so it declares no charset and the
/// Content-Type is the bare media type. JSON `null` renders as an empty body.
///
/// Indentation is taken, in order, from an `indent` parameter on the
/// accepted media type, an `indent` value in the renderer context, and the
/// configured default. Every source is capped at [`MAX_INDENT`] spaces.
#[derive(Debug, Clone, Default)]
pub struct JSONRenderer {
	pub indent: Option<usize>,
}

impl JSONRenderer {
	/// Creates a renderer producing compact JSON
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::{JSONRenderer, Renderer};
	///
	/// let renderer = JSONRenderer::new();
	/// assert_eq!(renderer.media_type(), "application/json");
	/// assert_eq!(renderer.charset(), None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a renderer from settings
	pub fn from_config(config: &JsonConfig) -> Self {
		Self {
			indent: config.indent,
		}
	}

	/// Sets the default indentation
	pub fn indent(mut self, indent: usize) -> Self {
		self.indent = Some(indent);
		self
	}

	fn resolve_indent(&self, media_type: &str, context: &RendererContext) -> Option<usize> {
		media_type_indent(media_type)
			.or_else(|| {
				context
					.get("indent")
					.and_then(Value::as_u64)
					.map(|n| n.min(MAX_INDENT as u64) as usize)
			})
			.or(self.indent)
			.map(|indent| indent.min(MAX_INDENT))
	}
}

fn media_type_indent(media_type: &str) -> Option<usize> {
	media_type.split(';').skip(1).find_map(|param| {
		let (key, value) = param.split_once('=')?;
		if key.trim().eq_ignore_ascii_case("indent") {
			let indent: u64 = value.trim().trim_matches('"').parse().ok()?;
			Some(indent.min(MAX_INDENT as u64) as usize)
		} else {
			None
		}
	})
}

impl Renderer for JSONRenderer {
	fn media_type(&self) -> &str {
		"application/json"
	}

	fn format(&self) -> Option<&str> {
		Some("json")
	}

	fn charset(&self) -> Option<&str> {
		None
	}

	fn render(
		&self,
		data: &Value,
		media_type: &str,
		context: &RendererContext,
	) -> Result<Rendered> {
		if data.is_null() {
			return Ok(Rendered::Bytes(Bytes::new()));
		}

		let bytes = match self.resolve_indent(media_type, context) {
			Some(indent) => {
				let indent = vec![b' '; indent];
				let mut out = Vec::new();
				let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
				data.serialize(&mut ser)?;
				out
			}
			None => serde_json::to_vec(data)?,
		};

		Ok(Rendered::Bytes(Bytes::from(bytes)))
	}
}
