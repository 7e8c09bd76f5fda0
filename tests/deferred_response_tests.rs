//! Rendering contract tests for `DeferredResponse`
//!
//! Modeled on DRF's `test_response.py`: a response is created with raw data,
//! negotiated by hand, then rendered.

use std::sync::Arc;

use bytes::Bytes;
use hyper::StatusCode;
use hyper::header::CONTENT_TYPE;
use reinhardt_deferred::{
	DeferredResponse, Error, JSONRenderer, Rendered, Renderer, RendererContext, Result,
	STATUS_CODE_TEXT, TextConfig, TextRenderer, status_text,
};
use rstest::rstest;
use serde_json::{Value, json};

/// Renderer with a configurable charset that emits either text or bytes
struct MockRenderer {
	charset: Option<&'static str>,
	as_text: bool,
}

impl MockRenderer {
	fn text(charset: Option<&'static str>) -> Arc<dyn Renderer> {
		Arc::new(Self {
			charset,
			as_text: true,
		})
	}

	fn bytes(charset: Option<&'static str>) -> Arc<dyn Renderer> {
		Arc::new(Self {
			charset,
			as_text: false,
		})
	}
}

impl Renderer for MockRenderer {
	fn media_type(&self) -> &str {
		"mock/renderer"
	}

	fn charset(&self) -> Option<&str> {
		self.charset
	}

	fn render(&self, data: &Value, _media_type: &str, context: &RendererContext) -> Result<Rendered> {
		let status = context.response().map(|r| r.status.as_u16()).unwrap_or(0);
		let text = format!("{}:{}", status, data.as_str().unwrap_or_default());
		if self.as_text {
			Ok(Rendered::Text(text))
		} else {
			Ok(Rendered::Bytes(Bytes::from(text)))
		}
	}
}

fn content_type(response: &DeferredResponse) -> &str {
	response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.unwrap_or_default()
}

#[test]
fn test_every_table_entry_matches_status_text() {
	for (code, text) in STATUS_CODE_TEXT {
		let status = StatusCode::from_u16(*code).unwrap();
		let response = DeferredResponse::new(None).with_status(status);
		assert_eq!(response.status_text(), *text);
		assert_eq!(status_text(*code), *text);
	}
}

#[rstest]
#[case(Some("utf-8"), "application/json", "application/json; charset=utf-8")]
#[case(Some("iso-8859-1"), "text/plain", "text/plain; charset=iso-8859-1")]
#[case(None, "application/json", "application/json")]
fn test_negotiated_content_type(
	#[case] charset: Option<&'static str>,
	#[case] media_type: &str,
	#[case] expected: &str,
) {
	let mut response = DeferredResponse::new(json!("x"));
	response.accept(MockRenderer::bytes(charset), media_type, RendererContext::new());

	response.rendered_content().unwrap();

	assert_eq!(content_type(&response), expected);
}

#[rstest]
#[case(Some("utf-8"))]
#[case(None)]
fn test_explicit_content_type_is_verbatim(#[case] charset: Option<&'static str>) {
	let mut response = DeferredResponse::new(json!("a,b")).with_content_type("text/csv");
	response.accept(MockRenderer::bytes(charset), "application/json", RendererContext::new());

	response.rendered_content().unwrap();

	assert_eq!(content_type(&response), "text/csv");
}

#[test]
fn test_text_is_encoded_with_charset() {
	let mut response = DeferredResponse::new(json!("caf\u{e9}"));
	response.accept(MockRenderer::text(Some("utf-8")), "mock/renderer", RendererContext::new());

	let body = response.rendered_content().unwrap();

	assert_eq!(&body[..], "200:caf\u{e9}".as_bytes());
}

#[test]
fn test_text_is_encoded_with_non_utf8_charset() {
	let mut response = DeferredResponse::new(json!("caf\u{e9}")).with_status(StatusCode::CREATED);
	response.accept(MockRenderer::text(Some("latin1")), "mock/renderer", RendererContext::new());

	let body = response.rendered_content().unwrap();

	assert_eq!(&body[..], b"201:caf\xe9");
}

#[test]
fn test_text_without_charset_is_contract_violation() {
	let mut response = DeferredResponse::new(json!("x"));
	response.accept(MockRenderer::text(None), "mock/renderer", RendererContext::new());

	let err = response.rendered_content().unwrap_err();

	assert!(matches!(err, Error::MissingCharset));
	assert!(err.is_contract_violation());
}

#[test]
fn test_bytes_are_returned_unchanged() {
	let mut response = DeferredResponse::new(json!("raw")).with_status(StatusCode::ACCEPTED);
	response.accept(MockRenderer::bytes(None), "mock/renderer", RendererContext::new());

	assert_eq!(response.rendered_content().unwrap(), Bytes::from_static(b"202:raw"));
}

#[test]
fn test_missing_renderer() {
	let mut response = DeferredResponse::new(json!("x"));
	response.set_accepted_media_type("application/json");
	response.set_renderer_context(RendererContext::new());

	let err = response.rendered_content().unwrap_err();

	assert!(matches!(err, Error::RendererNotSet));
	assert!(err.is_contract_violation());
	assert!(response.headers().get(CONTENT_TYPE).is_none());
}

#[test]
fn test_missing_media_type() {
	let mut response = DeferredResponse::new(json!("x"));
	response.set_accepted_renderer(Arc::new(JSONRenderer::new()));
	response.set_renderer_context(RendererContext::new());

	let err = response.rendered_content().unwrap_err();

	assert!(matches!(err, Error::MediaTypeNotSet));
	assert!(err.is_contract_violation());
}

#[test]
fn test_missing_renderer_context() {
	let mut response = DeferredResponse::new(json!("x"));
	response.set_accepted_renderer(Arc::new(JSONRenderer::new()));
	response.set_accepted_media_type("application/json");

	let err = response.rendered_content().unwrap_err();

	assert!(matches!(err, Error::RendererContextNotSet));
	assert!(err.is_contract_violation());
}

#[test]
fn test_state_excludes_transient_fields() {
	let mut response = DeferredResponse::new(json!({"large": "payload"}))
		.with_status(StatusCode::BAD_REQUEST)
		.with_template_name("api.html")
		.with_exception(true)
		.with_content_type("application/problem+json")
		.with_headers([("X-A", "1")])
		.unwrap();
	response.accept(
		Arc::new(JSONRenderer::new()),
		"application/json",
		RendererContext::new().with("view", "UserList"),
	);
	response.rendered_content().unwrap();

	let state = serde_json::to_value(response.get_state()).unwrap();
	let keys: Vec<&str> = state.as_object().unwrap().keys().map(String::as_str).collect();

	for excluded in ["accepted_renderer", "renderer_context", "data"] {
		assert!(!keys.contains(&excluded), "{} leaked into state", excluded);
	}
	assert_eq!(state["status_code"], json!(400));
	assert_eq!(state["template_name"], json!("api.html"));
	assert_eq!(state["exception"], json!(true));
	assert_eq!(state["content_type"], json!("application/problem+json"));
	let headers = state["headers"].as_array().unwrap();
	assert!(headers.contains(&json!(["x-a", "1"])));
	assert!(headers.contains(&json!(["content-type", "application/problem+json"])));
}

#[test]
fn test_restored_state_requires_renegotiation() {
	let mut response = DeferredResponse::new(json!("cached")).with_status(StatusCode::CREATED);
	response.accept(MockRenderer::bytes(None), "mock/renderer", RendererContext::new());
	response.rendered_content().unwrap();

	let encoded = serde_json::to_string(&response.get_state()).unwrap();
	let mut restored = DeferredResponse::from_state(serde_json::from_str(&encoded).unwrap()).unwrap();

	assert_eq!(restored.status(), StatusCode::CREATED);
	assert_eq!(content_type(&restored), "mock/renderer");
	assert!(restored.data().is_none());
	assert!(restored.accepted_renderer().is_none());
	assert!(restored.renderer_context().is_none());
	assert!(matches!(restored.rendered_content(), Err(Error::RendererNotSet)));

	restored.accept(MockRenderer::bytes(None), "mock/renderer", RendererContext::new());
	assert_eq!(&restored.rendered_content().unwrap()[..], b"201:");
}

#[rstest]
#[case(Value::Null, StatusCode::OK)]
#[case(json!({"k": "v"}), StatusCode::NOT_FOUND)]
#[case(json!([1, 2]), StatusCode::NO_CONTENT)]
fn test_constructor_headers(#[case] data: Value, #[case] status: StatusCode) {
	let response = DeferredResponse::new(data)
		.with_status(status)
		.with_headers([("X-A", "1"), ("X-B", "2")])
		.unwrap();

	assert_eq!(response.headers().get("X-A").unwrap(), "1");
	assert_eq!(response.headers().get("X-B").unwrap(), "2");
	assert_eq!(response.headers().len(), 2);
}

#[test]
fn test_html_renderer_end_to_end() {
	let mut response = DeferredResponse::new(json!("<p>caf\u{e9}</p>"));
	response.accept(Arc::new(TextRenderer::html()), "text/html", RendererContext::new());

	let body = response.rendered_content().unwrap();

	assert_eq!(&body[..], "<p>caf\u{e9}</p>".as_bytes());
	assert_eq!(content_type(&response), "text/html; charset=utf-8");
}

#[test]
fn test_json_indent_from_accepted_media_type() {
	let mut response = DeferredResponse::new(json!({"a": 1}));
	response.accept(
		Arc::new(JSONRenderer::new()),
		"application/json; indent=2",
		RendererContext::new(),
	);

	let body = response.rendered_content().unwrap();

	assert_eq!(&body[..], b"{\n  \"a\": 1\n}");
	assert_eq!(content_type(&response), "application/json; indent=2");
}

#[test]
fn test_client_indent_is_capped() {
	let mut response = DeferredResponse::new(json!({"a": {"b": 1}}));
	response.accept(
		Arc::new(JSONRenderer::new()),
		"application/json; indent=5000000",
		RendererContext::new(),
	);

	let body = response.rendered_content().unwrap();

	assert_eq!(
		&body[..],
		b"{\n        \"a\": {\n                \"b\": 1\n        }\n}"
	);
}

#[rstest]
#[case("\u{80}", &[0x80])]
#[case("caf\u{e9}", b"caf\xe9")]
fn test_iso_8859_1_body_matches_declared_charset(#[case] text: &str, #[case] expected: &[u8]) {
	let mut response = DeferredResponse::new(json!(text));
	response.accept(
		Arc::new(TextRenderer::plain().with_config(&TextConfig {
			charset: "iso-8859-1".to_string(),
		})),
		"text/plain",
		RendererContext::new(),
	);

	let body = response.rendered_content().unwrap();

	assert_eq!(&body[..], expected);
	assert_eq!(content_type(&response), "text/plain; charset=iso-8859-1");
}

#[test]
fn test_euro_sign_is_not_iso_8859_1() {
	let mut response = DeferredResponse::new(json!("\u{20ac}"));
	response.accept(MockRenderer::text(Some("iso-8859-1")), "mock/renderer", RendererContext::new());

	assert!(matches!(response.rendered_content(), Err(Error::Encoding(_))));
}

#[test]
fn test_utf16_body_starts_with_bom() {
	let mut response = DeferredResponse::new(json!("ab"));
	response.accept(MockRenderer::text(Some("utf-16")), "mock/renderer", RendererContext::new());

	let body = response.rendered_content().unwrap();

	assert_eq!(&body[..2], &[0xff, 0xfe]);
	let units: Vec<u16> = body[2..]
		.chunks(2)
		.map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
		.collect();
	assert_eq!(String::from_utf16(&units).unwrap(), "200:ab");
}
