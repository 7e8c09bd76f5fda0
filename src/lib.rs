//! # Reinhardt Deferred
//!
//! API responses that carry unrendered data, similar to Django REST
//! Framework's `Response`.
//!
//! A view returns a [`DeferredResponse`] holding structured data. Content
//! negotiation then picks a [`Renderer`] and media type for the request, and
//! the body is produced only when [`DeferredResponse::rendered_content`] is
//! called by the output layer.
//!
//! ## Features
//!
//! - **Deferred rendering**: data stays unserialized until a renderer is accepted
//! - **Charset handling**: text renderers are encoded with their declared charset
//! - **Reason phrases**: [`status_text`] for the browsable API
//! - **Cache snapshots**: [`DeferredResponse::get_state`] drops renderer, context and data
//! - **Built-in renderers**: [`JSONRenderer`], [`YAMLRenderer`], [`TextRenderer`]
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use reinhardt_deferred::{DeferredResponse, RendererContext, YAMLRenderer};
//! use serde_json::json;
//!
//! let mut response = DeferredResponse::new(json!({"name": "Alice"}))
//!     .with_headers([("X-Request-Id", "42")])
//!     .unwrap();
//!
//! response.accept(Arc::new(YAMLRenderer::new()), "application/yaml", RendererContext::new());
//!
//! let body = response.rendered_content().unwrap();
//! assert_eq!(&body[..], b"name: Alice\n");
//! assert_eq!(
//!     response.headers().get("content-type").unwrap(),
//!     "application/yaml; charset=utf-8"
//! );
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod charset;
pub mod config;
pub mod deferred;
pub mod error;
pub mod renderer;
pub mod renderers;
pub mod response;
pub mod status;

pub use config::{JsonConfig, RenderConfig, TextConfig};
pub use deferred::{DeferredResponse, ResponseState};
pub use error::{Error, Result};
pub use renderer::{Rendered, Renderer, RendererContext, ResponseView};
pub use renderers::{JSONRenderer, TextRenderer, YAMLRenderer};
pub use response::Response;
pub use status::{STATUS_CODE_TEXT, status_text};
