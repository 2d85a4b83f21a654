//! Request descriptor module
//!
//! Turns the raw request head and collected body into the owned value every
//! handler receives: method, path, parsed query, headers and cookies. The
//! body is kept as collected and only parsed when a handler asks for it, so
//! routes that ignore their input never fail on it.

use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use hyper::http::request::Parts;
use hyper::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::ApiError;

/// Parsed request body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(BTreeMap<String, String>),
    /// Any other content type, left untouched
    Raw(Bytes),
}

// Handler-facing input; the shipped routes never read it
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: HeaderMap,
    pub cookies: BTreeMap<String, String>,
    body: Bytes,
}

impl RequestDescriptor {
    /// Bare descriptor with no query, body, headers or cookies
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: HeaderMap::new(),
            cookies: BTreeMap::new(),
            body: Bytes::new(),
        }
    }

    /// Build from the request head and the already collected body
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(parse_query).unwrap_or_default(),
            headers: parts.headers.clone(),
            cookies: parse_cookies(&parts.headers),
            body,
        }
    }
}

#[allow(dead_code)] // Used in tests and by handlers that read their input
impl RequestDescriptor {
    /// Attach a body with its `Content-Type`
    #[must_use]
    pub fn with_body(mut self, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Collected body bytes, unparsed
    pub const fn raw_body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the body according to its `Content-Type`
    pub fn body(&self) -> Result<RequestBody, ApiError> {
        parse_body(self.header(CONTENT_TYPE.as_str()), &self.body)
    }

    /// Deserialize a JSON body; anything malformed is a 400
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::MalformedBody(e.to_string()))
    }

    /// Decode an urlencoded form body
    pub fn form(&self) -> Result<BTreeMap<String, String>, ApiError> {
        let text =
            std::str::from_utf8(&self.body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        Ok(parse_query(text))
    }
}

/// Parse `a=1&b=two+words` into a map. Later duplicates win.
pub fn parse_query(raw: &str) -> BTreeMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

/// Parse every `Cookie` header into a name -> value map
pub fn parse_cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"');
            Some((name.to_string(), percent_decode(value)))
        })
        .collect()
}

fn parse_body(content_type: Option<&str>, body: &Bytes) -> Result<RequestBody, ApiError> {
    if body.is_empty() {
        return Ok(RequestBody::Empty);
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if mime == "application/json" || mime.ends_with("+json") {
        return serde_json::from_slice(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::MalformedBody(e.to_string()));
    }

    if mime == "application/x-www-form-urlencoded" {
        let text =
            std::str::from_utf8(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        return Ok(RequestBody::Form(parse_query(text)));
    }

    Ok(RequestBody::Raw(body.clone()))
}

/// Decode `%XX` escapes and `+` as space; invalid escapes are kept verbatim
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Request;
    use serde_json::json;

    fn parts(builder: hyper::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("page=2&name=Fred+Smith&tag=%23rust&flag&=x");
        assert_eq!(query["page"], "2");
        assert_eq!(query["name"], "Fred Smith");
        assert_eq!(query["tag"], "#rust");
        assert_eq!(query["flag"], "");
    }

    #[test]
    fn test_percent_decode_keeps_invalid_escapes() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
    }

    #[test]
    fn test_parse_cookies() {
        let p = parts(
            Request::builder()
                .header("cookie", "session=abc123; theme=\"dark\"")
                .header("cookie", "lang=en%2DUS"),
        );
        let cookies = parse_cookies(&p.headers);
        assert_eq!(cookies["session"], "abc123");
        assert_eq!(cookies["theme"], "dark");
        assert_eq!(cookies["lang"], "en-US");
    }

    #[test]
    fn test_json_body() {
        let p = parts(
            Request::post("/api/todos?done=false")
                .header("content-type", "application/json; charset=utf-8"),
        );
        let req = RequestDescriptor::from_parts(&p, Bytes::from(r#"{"title":"x"}"#));
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/api/todos");
        assert_eq!(req.query["done"], "false");
        assert_eq!(req.body().unwrap(), RequestBody::Json(json!({ "title": "x" })));

        let value: Value = req.json().unwrap();
        assert_eq!(value["title"], "x");
    }

    #[test]
    fn test_malformed_json_only_fails_when_read() {
        let p = parts(Request::post("/api").header("content-type", "application/json"));
        let req = RequestDescriptor::from_parts(&p, Bytes::from("{not json"));
        assert_eq!(req.raw_body(), &Bytes::from("{not json"));
        assert!(matches!(req.body(), Err(ApiError::MalformedBody(_))));
        assert!(matches!(req.json::<Value>(), Err(ApiError::MalformedBody(_))));
    }

    #[test]
    fn test_form_body() {
        let req = RequestDescriptor::new(Method::POST, "/api").with_body(
            "application/x-www-form-urlencoded",
            "firstName=Ada&lastName=Love+lace",
        );
        let RequestBody::Form(form) = req.body().unwrap() else {
            panic!("expected form body");
        };
        assert_eq!(form["firstName"], "Ada");
        assert_eq!(form["lastName"], "Love lace");
        assert_eq!(req.form().unwrap(), form);
    }

    #[test]
    fn test_empty_and_raw_bodies() {
        let p = parts(Request::post("/api").header("content-type", "text/plain"));
        let req = RequestDescriptor::from_parts(&p, Bytes::new());
        assert_eq!(req.body().unwrap(), RequestBody::Empty);

        let req = RequestDescriptor::from_parts(&p, Bytes::from("hello"));
        assert_eq!(req.body().unwrap(), RequestBody::Raw(Bytes::from("hello")));
        assert_eq!(req.header("content-type"), Some("text/plain"));
    }
}
