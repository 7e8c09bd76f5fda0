//! Reason phrases for HTTP status codes
//!
//! The phrases are uppercase, matching the text the browsable API templates
//! display next to a status code.

/// Status code to reason phrase table, sorted by code
pub const STATUS_CODE_TEXT: &[(u16, &str)] = &[
	(100, "CONTINUE"),
	(101, "SWITCHING PROTOCOLS"),
	(102, "PROCESSING"),
	(200, "OK"),
	(201, "CREATED"),
	(202, "ACCEPTED"),
	(203, "NON-AUTHORITATIVE INFORMATION"),
	(204, "NO CONTENT"),
	(205, "RESET CONTENT"),
	(206, "PARTIAL CONTENT"),
	(207, "MULTI-STATUS"),
	(208, "ALREADY REPORTED"),
	(226, "IM USED"),
	(300, "MULTIPLE CHOICES"),
	(301, "MOVED PERMANENTLY"),
	(302, "FOUND"),
	(303, "SEE OTHER"),
	(304, "NOT MODIFIED"),
	(305, "USE PROXY"),
	(306, "RESERVED"),
	(307, "TEMPORARY REDIRECT"),
	(400, "BAD REQUEST"),
	(401, "UNAUTHORIZED"),
	(402, "PAYMENT REQUIRED"),
	(403, "FORBIDDEN"),
	(404, "NOT FOUND"),
	(405, "METHOD NOT ALLOWED"),
	(406, "NOT ACCEPTABLE"),
	(407, "PROXY AUTHENTICATION REQUIRED"),
	(408, "REQUEST TIMEOUT"),
	(409, "CONFLICT"),
	(410, "GONE"),
	(411, "LENGTH REQUIRED"),
	(412, "PRECONDITION FAILED"),
	(413, "REQUEST ENTITY TOO LARGE"),
	(414, "REQUEST-URI TOO LONG"),
	(415, "UNSUPPORTED MEDIA TYPE"),
	(416, "REQUESTED RANGE NOT SATISFIABLE"),
	(417, "EXPECTATION FAILED"),
	(422, "UNPROCESSABLE ENTITY"),
	(423, "LOCKED"),
	(424, "FAILED DEPENDENCY"),
	(426, "UPGRADE REQUIRED"),
	(500, "INTERNAL SERVER ERROR"),
	(501, "NOT IMPLEMENTED"),
	(502, "BAD GATEWAY"),
	(503, "SERVICE UNAVAILABLE"),
	(504, "GATEWAY TIMEOUT"),
	(505, "HTTP VERSION NOT SUPPORTED"),
	(506, "VARIANT ALSO NEGOTIATES"),
	(507, "INSUFFICIENT STORAGE"),
	(508, "LOOP DETECTED"),
	(510, "NOT EXTENDED"),
];

/// Returns the reason phrase for `code`, or an empty string for unknown codes
///
/// # Examples
///
/// ```
/// use reinhardt_deferred::status::status_text;
///
/// assert_eq!(status_text(404), "NOT FOUND");
/// assert_eq!(status_text(306), "RESERVED");
/// assert_eq!(status_text(418), "");
/// ```
pub fn status_text(code: u16) -> &'static str {
	STATUS_CODE_TEXT
		.binary_search_by_key(&code, |(c, _)| *c)
		.map(|idx| STATUS_CODE_TEXT[idx].1)
		.unwrap_or("")
}
