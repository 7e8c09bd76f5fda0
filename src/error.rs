//! Error types for deferred rendering

use thiserror::Error;

/// Result type for deferred rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or rendering a [`DeferredResponse`](crate::DeferredResponse)
///
/// The first four variants are contract violations: they mean the
/// negotiation step upstream did not prepare the response before rendering,
/// or the selected renderer is misconfigured. They are never recovered from
/// inside this crate.
#[derive(Debug, Error)]
pub enum Error {
	/// `rendered_content` was called before a renderer was accepted
	#[error(".accepted_renderer not set on Response")]
	RendererNotSet,

	/// `rendered_content` was called before a media type was accepted
	#[error(".accepted_media_type not set on Response")]
	MediaTypeNotSet,

	/// `rendered_content` was called before a renderer context was assigned
	#[error(".renderer_context not set on Response")]
	RendererContextNotSet,

	/// The renderer produced text but declares no charset to encode it with
	#[error("renderer returned text, and did not specify a charset value")]
	MissingCharset,

	/// A header name or value could not be represented on the wire
	#[error("Invalid header {name}: {reason}")]
	InvalidHeader { name: String, reason: String },

	/// The declared charset label is not a known encoding
	#[error("Unknown charset: {0}")]
	UnknownCharset(String),

	/// The rendered text contains characters the charset cannot represent
	#[error("Cannot encode rendered text as {0}")]
	Encoding(String),

	/// The renderer failed to serialize the payload
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Renderer configuration could not be loaded
	#[error("Configuration error: {0}")]
	Config(String),
}

impl Error {
	/// Returns true for errors caused by a misconfigured rendering pipeline
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_deferred::Error;
	///
	/// assert!(Error::RendererNotSet.is_contract_violation());
	/// assert!(Error::MissingCharset.is_contract_violation());
	/// assert!(!Error::UnknownCharset("klingon".into()).is_contract_violation());
	/// ```
	pub fn is_contract_violation(&self) -> bool {
		matches!(
			self,
			Error::RendererNotSet
				| Error::MediaTypeNotSet
				| Error::RendererContextNotSet
				| Error::MissingCharset
		)
	}

	pub(crate) fn invalid_header(name: &str, reason: impl ToString) -> Self {
		Error::InvalidHeader {
			name: name.to_string(),
			reason: reason.to_string(),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}

impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}

impl From<toml::de::Error> for Error {
	fn from(err: toml::de::Error) -> Self {
		Error::Config(err.to_string())
	}
}
