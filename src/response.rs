use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};

use crate::error::{Error, Result};

/// HTTP Response representation
///
/// The plain status + headers + body value that a [`DeferredResponse`](crate::DeferredResponse)
/// wraps and eventually renders into.
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code and an empty body
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::ACCEPTED);
	/// assert_eq!(response.status, StatusCode::ACCEPTED);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Set the response body
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::Response;
	/// use bytes::Bytes;
	///
	/// let response = Response::ok().with_body("Hello, World!");
	/// assert_eq!(response.body, Bytes::from("Hello, World!"));
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header, failing on names or values that are not valid on the wire
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::Response;
	///
	/// let response = Response::ok().with_header("X-Custom-Header", "custom-value").unwrap();
	/// assert_eq!(
	///     response.headers.get("x-custom-header").unwrap().to_str().unwrap(),
	///     "custom-value"
	/// );
	///
	/// assert!(Response::ok().with_header("bad header", "v").is_err());
	/// ```
	pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
		self.set_header(name, value)?;
		Ok(self)
	}

	/// Insert a header in place, replacing any existing value with the same name
	pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
		let header_name = HeaderName::from_bytes(name.as_bytes())
			.map_err(|e| Error::invalid_header(name, e))?;
		let header_value =
			HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e))?;
		self.headers.insert(header_name, header_value);
		Ok(())
	}

	/// Returns the Content-Type header, if set and valid UTF-8
	pub fn content_type(&self) -> Option<&str> {
		self.headers
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
	}
}

impl Default for Response {
	fn default() -> Self {
		Self::ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_header_overwrites() {
		let mut response = Response::ok();
		response.set_header("X-Trace", "first").unwrap();
		response.set_header("x-trace", "second").unwrap();

		assert_eq!(response.headers.len(), 1);
		assert_eq!(response.headers.get("x-trace").unwrap(), "second");
	}

	#[test]
	fn test_invalid_header_value_is_rejected() {
		let mut response = Response::ok();
		let err = response.set_header("X-Bad", "line\nbreak").unwrap_err();

		assert!(matches!(err, Error::InvalidHeader { ref name, .. } if name == "X-Bad"));
		assert!(response.headers.is_empty());
	}

	#[test]
	fn test_content_type_accessor() {
		let response = Response::ok()
			.with_header("Content-Type", "text/plain")
			.unwrap();
		assert_eq!(response.content_type(), Some("text/plain"));
		assert_eq!(Response::ok().content_type(), None);
	}
}
