//! Buffered responses and API error extraction.

use crate::FetchError;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A response whose body has been read to the end.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    /// Header pairs in arrival order; names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// `{ "message": "..." }`, the catalog API's error shape.
#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

impl Response {
    pub fn new(status: StatusCode, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8.
    pub fn text(&self) -> Result<&str, FetchError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| FetchError::Parse(format!("response body is not UTF-8: {}", e)))
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// First header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    /// What to show the user when this response is a failure.
    ///
    /// The JSON `message` field wins, then the raw body text, then the
    /// status reason phrase.
    pub fn error_message(&self) -> String {
        let from_json = serde_json::from_slice::<ApiMessage>(&self.body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = from_json {
            return message;
        }

        match self.text().map(str::trim) {
            Ok(text) if !text.is_empty() => text.to_string(),
            _ => self
                .status
                .canonical_reason()
                .unwrap_or("Something went wrong")
                .to_string(),
        }
    }

    /// Turn any non-2xx response into [`FetchError::Http`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Http {
            status: self.status.as_u16(),
            message: self.error_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> Response {
        let status = StatusCode::from_u16(status).unwrap();
        Response::new(status, Vec::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_success_range() {
        assert!(reply(200, "").is_success());
        assert!(reply(201, "{}").error_for_status().is_ok());
        assert!(!reply(304, "").is_success());
    }

    #[test]
    fn test_body_decoding() {
        #[derive(Deserialize)]
        struct Pages {
            pages: u32,
        }

        let ok = reply(200, r#"{"pages": 3}"#);
        assert_eq!(ok.json::<Pages>().unwrap().pages, 3);
        assert!(matches!(
            reply(200, "<html>").json::<Pages>(),
            Err(FetchError::Parse(_))
        ));

        let binary = Response::new(StatusCode::OK, Vec::new(), vec![0xff, 0xfe]);
        assert!(matches!(binary.text(), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_header_lookup() {
        let headers = vec![("content-type".to_string(), "application/json".to_string())];
        let resp = Response::new(StatusCode::OK, headers, Vec::new());
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("etag"), None);
    }

    #[test]
    fn test_api_message_becomes_error() {
        match reply(400, r#"{"message":"Invalid product id"}"#).error_for_status() {
            Err(FetchError::Http { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid product id");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(reply(500, "boom\n").error_message(), "boom");
        assert_eq!(reply(404, "").error_message(), "Not Found");
        assert_eq!(reply(422, r#"{"message":"  "}"#).error_message(), r#"{"message":"  "}"#);
        assert_eq!(reply(401, r#"{"error":"x"}"#).error_message(), r#"{"error":"x"}"#);
    }
}
