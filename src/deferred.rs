//! Deferred-rendering response
//!
//! A [`DeferredResponse`] is created by a view with unrendered data. Content
//! negotiation later picks a renderer and media type, and the body is only
//! produced when the response is sent:
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_deferred::{DeferredResponse, JSONRenderer, RendererContext};
//! use hyper::StatusCode;
//! use serde_json::json;
//!
//! let mut response = DeferredResponse::new(json!({"id": 1}))
//!     .with_status(StatusCode::CREATED);
//!
//! // Assigned by the negotiation step
//! response.accept(Arc::new(JSONRenderer::new()), "application/json", RendererContext::new());
//!
//! let body = response.rendered_content().unwrap();
//! assert_eq!(&body[..], br#"{"id":1}"#);
//! assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
//! assert_eq!(response.status_text(), "CREATED");
//! ```

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::charset::{encode_text, format_content_type};
use crate::error::{Error, Result};
use crate::renderer::{Rendered, Renderer, RendererContext, ResponseView};
use crate::response::Response;
use crate::status::status_text;

/// A response that holds unrendered data until a renderer is negotiated
#[derive(Clone)]
pub struct DeferredResponse {
	inner: Response,
	data: Option<Value>,
	template_name: Option<String>,
	exception: bool,
	content_type: Option<String>,
	accepted_renderer: Option<Arc<dyn Renderer>>,
	accepted_media_type: Option<String>,
	renderer_context: Option<RendererContext>,
}

impl DeferredResponse {
	/// Creates a 200 response holding `data`
	///
	/// Pass `None` (or `Value::Null`) for a response without a payload.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::DeferredResponse;
	/// use hyper::StatusCode;
	/// use serde_json::json;
	///
	/// let response = DeferredResponse::new(json!(["a", "b"]));
	/// assert_eq!(response.status(), StatusCode::OK);
	/// assert_eq!(response.data(), Some(&json!(["a", "b"])));
	///
	/// let empty = DeferredResponse::new(None);
	/// assert!(empty.data().is_none());
	/// ```
	pub fn new(data: impl Into<Option<Value>>) -> Self {
		Self {
			inner: Response::ok(),
			data: data.into(),
			template_name: None,
			exception: false,
			content_type: None,
			accepted_renderer: None,
			accepted_media_type: None,
			renderer_context: None,
		}
	}

	pub fn with_status(mut self, status: StatusCode) -> Self {
		self.inner.status = status;
		self
	}

	pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
		self.template_name = Some(template_name.into());
		self
	}

	/// Marks the response as produced by an exception handler
	pub fn with_exception(mut self, exception: bool) -> Self {
		self.exception = exception;
		self
	}

	/// Forces the Content-Type, bypassing the negotiated media type and charset
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// Applies headers in iteration order; a repeated name keeps the last value
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::DeferredResponse;
	///
	/// let response = DeferredResponse::new(None)
	///     .with_headers([("X-A", "1"), ("X-B", "2"), ("X-A", "3")])
	///     .unwrap();
	///
	/// assert_eq!(response.headers().get("x-a").unwrap(), "3");
	/// assert_eq!(response.headers().get("x-b").unwrap(), "2");
	/// ```
	pub fn with_headers<I, K, V>(mut self, headers: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		for (name, value) in headers {
			self.inner.set_header(name.as_ref(), value.as_ref())?;
		}
		Ok(self)
	}

	/// Records the outcome of content negotiation
	pub fn accept(
		&mut self,
		renderer: Arc<dyn Renderer>,
		media_type: impl Into<String>,
		context: RendererContext,
	) {
		self.accepted_renderer = Some(renderer);
		self.accepted_media_type = Some(media_type.into());
		self.renderer_context = Some(context);
	}

	pub fn set_accepted_renderer(&mut self, renderer: Arc<dyn Renderer>) {
		self.accepted_renderer = Some(renderer);
	}

	pub fn set_accepted_media_type(&mut self, media_type: impl Into<String>) {
		self.accepted_media_type = Some(media_type.into());
	}

	pub fn set_renderer_context(&mut self, context: RendererContext) {
		self.renderer_context = Some(context);
	}

	/// Renders the body with the accepted renderer
	///
	/// Every call runs the renderer again and rewrites the Content-Type
	/// header. The renderer, media type and context must all have been
	/// assigned beforehand.
	///
	/// # Errors
	///
	/// Returns a contract violation ([`Error::is_contract_violation`]) when a
	/// negotiation field is missing or when the renderer emits text without
	/// declaring a charset. An empty media type or charset counts as missing.
	/// Renderer and encoding failures are passed through.
	pub fn rendered_content(&mut self) -> Result<Bytes> {
		let renderer = match self.accepted_renderer.clone() {
			Some(renderer) => renderer,
			None => return Err(contract_violation(Error::RendererNotSet)),
		};
		let media_type = match self.accepted_media_type.clone() {
			Some(media_type) if !media_type.trim().is_empty() => media_type,
			_ => return Err(contract_violation(Error::MediaTypeNotSet)),
		};
		if self.renderer_context.is_none() {
			return Err(contract_violation(Error::RendererContextNotSet));
		}

		// An empty charset counts as undeclared
		let charset = renderer.charset().filter(|c| !c.trim().is_empty());
		let content_type = format_content_type(&media_type, charset, self.content_type.as_deref());
		self.inner.set_header(CONTENT_TYPE.as_str(), &content_type)?;

		let view = self.view();
		let Some(context) = self.renderer_context.as_mut() else {
			return Err(contract_violation(Error::RendererContextNotSet));
		};
		context.set_response(view);

		tracing::debug!(
			media_type = %media_type,
			content_type = %content_type,
			status = self.inner.status.as_u16(),
			"rendering deferred response"
		);

		let null = Value::Null;
		let data = self.data.as_ref().unwrap_or(&null);
		match renderer.render(data, &media_type, context)? {
			Rendered::Bytes(bytes) => Ok(bytes),
			Rendered::Text(text) => match charset {
				Some(charset) => encode_text(&text, charset),
				None => Err(contract_violation(Error::MissingCharset)),
			},
		}
	}

	/// Renders the body and converts into a plain [`Response`]
	pub fn into_response(mut self) -> Result<Response> {
		let body = self.rendered_content()?;
		Ok(self.inner.with_body(body))
	}

	/// Reason phrase for the status code, empty for unknown codes
	pub fn status_text(&self) -> &'static str {
		status_text(self.inner.status.as_u16())
	}

	/// Snapshot of the state worth caching
	///
	/// The renderer, the renderer context and the data are left out: they
	/// reference live negotiation objects or large payloads. A response
	/// restored with [`DeferredResponse::from_state`] must be negotiated
	/// again before it can be rendered.
	pub fn get_state(&self) -> ResponseState {
		ResponseState {
			status_code: self.inner.status.as_u16(),
			headers: self
				.inner
				.headers
				.iter()
				.filter_map(|(name, value)| {
					value
						.to_str()
						.ok()
						.map(|v| (name.as_str().to_string(), v.to_string()))
				})
				.collect(),
			template_name: self.template_name.clone(),
			exception: self.exception,
			content_type: self.content_type.clone(),
		}
	}

	/// Rebuilds a response from a cached snapshot
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::DeferredResponse;
	/// use serde_json::json;
	///
	/// let original = DeferredResponse::new(json!({"big": "payload"}))
	///     .with_headers([("X-Cache", "miss")])
	///     .unwrap();
	///
	/// let mut restored = DeferredResponse::from_state(original.get_state()).unwrap();
	/// assert!(restored.data().is_none());
	/// assert_eq!(restored.headers().get("x-cache").unwrap(), "miss");
	/// assert!(restored.rendered_content().unwrap_err().is_contract_violation());
	/// ```
	pub fn from_state(state: ResponseState) -> Result<Self> {
		let status = StatusCode::from_u16(state.status_code).map_err(|e| {
			Error::Serialization(format!("invalid status code {}: {}", state.status_code, e))
		})?;

		let mut response = Self::new(None)
			.with_status(status)
			.with_exception(state.exception);
		response.template_name = state.template_name;
		response.content_type = state.content_type;

		// Multi-valued headers were flattened into repeated pairs
		for (name, value) in &state.headers {
			let header_name = hyper::header::HeaderName::from_bytes(name.as_bytes())
				.map_err(|e| Error::invalid_header(name, e))?;
			let header_value = hyper::header::HeaderValue::from_str(value)
				.map_err(|e| Error::invalid_header(name, e))?;
			response.inner.headers.append(header_name, header_value);
		}

		Ok(response)
	}

	fn view(&self) -> ResponseView {
		ResponseView {
			status: self.inner.status,
			status_text: self.status_text(),
			headers: self.inner.headers.clone(),
			exception: self.exception,
			template_name: self.template_name.clone(),
		}
	}

	pub fn data(&self) -> Option<&Value> {
		self.data.as_ref()
	}

	pub fn status(&self) -> StatusCode {
		self.inner.status
	}

	pub fn status_code(&self) -> u16 {
		self.inner.status.as_u16()
	}

	pub fn set_status(&mut self, status: StatusCode) {
		self.inner.status = status;
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.inner.headers
	}

	/// Sets a header, replacing an existing value
	pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
		self.inner.set_header(name, value)
	}

	pub fn template_name(&self) -> Option<&str> {
		self.template_name.as_deref()
	}

	pub fn is_exception(&self) -> bool {
		self.exception
	}

	pub fn content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}

	pub fn accepted_renderer(&self) -> Option<&Arc<dyn Renderer>> {
		self.accepted_renderer.as_ref()
	}

	pub fn accepted_media_type(&self) -> Option<&str> {
		self.accepted_media_type.as_deref()
	}

	pub fn renderer_context(&self) -> Option<&RendererContext> {
		self.renderer_context.as_ref()
	}
}

impl fmt::Debug for DeferredResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeferredResponse")
			.field("status", &self.inner.status)
			.field("headers", &self.inner.headers)
			.field("data", &self.data)
			.field("template_name", &self.template_name)
			.field("exception", &self.exception)
			.field("content_type", &self.content_type)
			.field(
				"accepted_renderer",
				&self.accepted_renderer.as_ref().map(|r| r.media_type().to_string()),
			)
			.field("accepted_media_type", &self.accepted_media_type)
			.field("renderer_context", &self.renderer_context)
			.finish()
	}
}

fn contract_violation(err: Error) -> Error {
	tracing::error!(error = %err, "deferred response rendered before negotiation completed");
	err
}

/// Cacheable snapshot of a [`DeferredResponse`]
///
/// Only the fields listed here are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseState {
	pub status_code: u16,
	/// Header pairs in map order; a multi-valued header appears once per value
	pub headers: Vec<(String, String)>,
	pub template_name: Option<String>,
	pub exception: bool,
	pub content_type: Option<String>,
}
