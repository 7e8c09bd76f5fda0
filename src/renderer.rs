//! Renderer capability
//!
//! A renderer turns the unrendered payload of a response into its final
//! representation for one media type. Which renderer handles a response is
//! decided by content negotiation before rendering starts.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::error::Result;

/// Output of a renderer
///
/// Binary formats return [`Rendered::Bytes`], which are sent unchanged.
/// Text formats return [`Rendered::Text`], which the response encodes with
/// the renderer charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
	Bytes(Bytes),
	Text(String),
}

impl From<Bytes> for Rendered {
	fn from(bytes: Bytes) -> Self {
		Rendered::Bytes(bytes)
	}
}

impl From<Vec<u8>> for Rendered {
	fn from(bytes: Vec<u8>) -> Self {
		Rendered::Bytes(Bytes::from(bytes))
	}
}

impl From<String> for Rendered {
	fn from(text: String) -> Self {
		Rendered::Text(text)
	}
}

impl From<&str> for Rendered {
	fn from(text: &str) -> Self {
		Rendered::Text(text.to_string())
	}
}

/// Renders response data into a specific media type
///
/// # Examples
///
/// ```
/// use reinhardt_deferred::{Renderer, Rendered, RendererContext, Result};
/// use serde_json::Value;
///
/// struct Shout;
///
/// impl Renderer for Shout {
///     fn media_type(&self) -> &str {
///         "text/plain"
///     }
///
///     fn charset(&self) -> Option<&str> {
///         Some("utf-8")
///     }
///
///     fn render(&self, data: &Value, _: &str, _: &RendererContext) -> Result<Rendered> {
///         Ok(data.to_string().to_uppercase().into())
///     }
/// }
///
/// let out = Shout.render(&Value::from("hi"), "text/plain", &RendererContext::new()).unwrap();
/// assert_eq!(out, Rendered::Text("\"HI\"".to_string()));
/// ```
pub trait Renderer: Send + Sync {
	/// Media type this renderer produces, e.g. `application/json`
	fn media_type(&self) -> &str;

	/// Short format name used by `?format=` and URL suffix selection
	fn format(&self) -> Option<&str> {
		None
	}

	/// Charset of text output; `None` for renderers that emit raw bytes
	fn charset(&self) -> Option<&str>;

	/// Renders `data` for `media_type`
	fn render(&self, data: &Value, media_type: &str, context: &RendererContext)
	-> Result<Rendered>;
}

/// Read-only view of the response being rendered
///
/// Injected into the [`RendererContext`] under the `response` key so a
/// renderer can look at the status and headers while producing output.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseView {
	pub status: StatusCode,
	pub status_text: &'static str,
	pub headers: HeaderMap,
	pub exception: bool,
	pub template_name: Option<String>,
}

/// Contextual values handed to a renderer
///
/// Holds arbitrary JSON values assigned by the view layer (request details,
/// indentation hints, ...) plus the typed view of the response itself.
#[derive(Clone, Default)]
pub struct RendererContext {
	values: HashMap<String, Value>,
	response: Option<ResponseView>,
}

impl RendererContext {
	/// Key under which the response view is exposed
	pub const RESPONSE_KEY: &'static str = "response";

	/// Creates an empty context
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a value, builder style
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::RendererContext;
	/// use serde_json::json;
	///
	/// let context = RendererContext::new().with("indent", json!(2));
	/// assert_eq!(context.get("indent"), Some(&json!(2)));
	/// ```
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Inserts a value, returning the previous one for the key
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.values.insert(key.into(), value.into())
	}

	/// Returns the value stored under `key`
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	/// Returns true if `key` is present, counting the injected response view
	pub fn contains_key(&self, key: &str) -> bool {
		(key == Self::RESPONSE_KEY && self.response.is_some()) || self.values.contains_key(key)
	}

	/// Returns the response view, present once rendering has started
	pub fn response(&self) -> Option<&ResponseView> {
		self.response.as_ref()
	}

	pub(crate) fn set_response(&mut self, view: ResponseView) {
		self.response = Some(view);
	}

	/// Number of plain values, not counting the response view
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl fmt::Debug for RendererContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RendererContext")
			.field("values", &self.values)
			.field("response", &self.response.as_ref().map(|r| r.status))
			.finish()
	}
}
