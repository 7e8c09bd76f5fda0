//! Charset handling for rendered output
//!
//! Renderers that produce text declare the charset it must be encoded with.
//! This module builds the resulting Content-Type value and performs the
//! encoding.

use bytes::Bytes;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::{Error, Result};

/// Builds the Content-Type for a negotiated media type
///
/// An explicit content type always wins and is used verbatim. Otherwise the
/// renderer charset, when present, is appended as a `charset` parameter.
///
/// # Examples
///
/// ```
/// use reinhardt_deferred::charset::format_content_type;
///
/// assert_eq!(
///     format_content_type("application/json", Some("utf-8"), None),
///     "application/json; charset=utf-8"
/// );
/// assert_eq!(format_content_type("application/json", None, None), "application/json");
/// assert_eq!(
///     format_content_type("application/json", Some("utf-8"), Some("text/csv")),
///     "text/csv"
/// );
/// ```
pub fn format_content_type(
	media_type: &str,
	charset: Option<&str>,
	explicit: Option<&str>,
) -> String {
	match (explicit, charset) {
		(Some(content_type), _) => content_type.to_string(),
		(None, Some(charset)) => format!("{}; charset={}", media_type, charset),
		(None, None) => media_type.to_string(),
	}
}

const ASCII_LABELS: &[&str] = &["ascii", "us-ascii", "646"];
const LATIN1_LABELS: &[&str] = &[
	"iso-8859-1",
	"iso8859-1",
	"iso_8859-1",
	"latin-1",
	"latin_1",
	"latin1",
	"latin",
	"l1",
	"cp819",
	"8859",
];
const UTF16_LABELS: &[&str] = &["utf-16", "utf16", "utf_16"];

fn label_in(label: &str, labels: &[&str]) -> bool {
	labels.iter().any(|l| l.eq_ignore_ascii_case(label))
}

/// Encodes `text` with the charset named by `label`
///
/// `ascii` and `iso-8859-1` (with their aliases) are encoded strictly: a
/// character outside the charset is an encoding error. Bare `utf-16` is
/// written little-endian with a byte order mark; `utf-16le` and `utf-16be`
/// carry none. Remaining labels resolve through the WHATWG encoding
/// registry (`utf8`, `shift_jis`, `windows-1252`, ...).
///
/// # Examples
///
/// ```
/// use reinhardt_deferred::charset::encode_text;
///
/// let bytes = encode_text("caf\u{e9}", "latin1").unwrap();
/// assert_eq!(&bytes[..], b"caf\xe9");
///
/// assert!(encode_text("\u{20ac}", "iso-8859-1").is_err());
/// assert!(encode_text("\u{2603}", "ascii").is_err());
/// assert!(encode_text("x", "not-a-charset").is_err());
/// ```
pub fn encode_text(text: &str, label: &str) -> Result<Bytes> {
	let trimmed = label.trim();
	if label_in(trimmed, ASCII_LABELS) {
		return encode_single_byte(text, trimmed, 0x7f);
	}
	if label_in(trimmed, LATIN1_LABELS) {
		return encode_single_byte(text, trimmed, 0xff);
	}
	if label_in(trimmed, UTF16_LABELS) {
		let mut out = vec![0xff, 0xfe];
		out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
		return Ok(Bytes::from(out));
	}

	let encoding = Encoding::for_label(trimmed.as_bytes())
		.ok_or_else(|| Error::UnknownCharset(trimmed.to_string()))?;

	if encoding == UTF_8 {
		return Ok(Bytes::copy_from_slice(text.as_bytes()));
	}
	if encoding == UTF_16LE {
		return Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
	}
	if encoding == UTF_16BE {
		return Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
	}

	let (encoded, used, had_errors) = encoding.encode(text);
	// encoding_rs falls back to UTF-8 for encodings it can only decode
	if used != encoding {
		return Err(Error::UnknownCharset(trimmed.to_string()));
	}
	if had_errors {
		return Err(Error::Encoding(encoding.name().to_string()));
	}
	Ok(Bytes::copy_from_slice(&encoded))
}

/// Maps each code point to one byte, failing above `max`
fn encode_single_byte(text: &str, label: &str, max: u32) -> Result<Bytes> {
	text.chars()
		.map(|c| {
			let code = u32::from(c);
			if code <= max {
				Ok(code as u8)
			} else {
				Err(Error::Encoding(label.to_string()))
			}
		})
		.collect::<Result<Vec<u8>>>()
		.map(Bytes::from)
}
