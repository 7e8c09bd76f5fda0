//! Built-in renderers
//!
//! - [`JSONRenderer`]: `application/json`, emits bytes
//! - [`YAMLRenderer`]: `application/yaml`, emits text
//! - [`TextRenderer`]: `text/html` / `text/plain`, emits text

mod json_renderer;
mod text_renderer;
mod yaml_renderer;

pub use json_renderer::{JSONRenderer, MAX_INDENT};
pub use text_renderer::TextRenderer;
pub use yaml_renderer::YAMLRenderer;
