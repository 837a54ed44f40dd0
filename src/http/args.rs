//! Request argument extraction
//!
//! Arguments come from the query string and, for form-encoded bodies, from
//! the body as well (`curl -X PUT -d "tags=funny" ".../corpus?id=5"`). Body
//! arguments follow query arguments, and the last value for a name wins.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};

use super::error::ApiError;
use crate::util::{is_truthy, split_terms};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decoded request arguments in arrival order
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
    pairs: Vec<(String, String)>,
}

impl RequestArgs {
    /// Decode a query string and an optional form body
    pub fn parse(query: Option<&str>, form_body: &[u8]) -> Result<Self, ApiError> {
        let mut pairs: Vec<(String, String)> = match query {
            Some(q) => serde_urlencoded::from_str(q)
                .map_err(|e| ApiError::BadRequest(format!("Malformed query string: {}", e)))?,
            None => Vec::new(),
        };
        if !form_body.is_empty() {
            let body: Vec<(String, String)> = serde_urlencoded::from_bytes(form_body)
                .map_err(|e| ApiError::BadRequest(format!("Malformed form body: {}", e)))?;
            pairs.extend(body);
        }
        Ok(Self { pairs })
    }

    /// Last value supplied for `name`, whitespace-trimmed
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
    }

    /// Like [`get`](Self::get), treating an empty value as absent
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Integer argument that must be present
    pub fn required_int(&self, name: &str) -> Result<i64, ApiError> {
        match self.get(name) {
            Some(raw) => parse_int(name, raw),
            None => Err(ApiError::BadRequest(format!("Missing argument {}", name))),
        }
    }

    /// Integer argument with a default. A supplied but empty value is malformed.
    pub fn int_or(&self, name: &str, default: i64) -> Result<i64, ApiError> {
        match self.get(name) {
            Some(raw) => parse_int(name, raw),
            None => Ok(default),
        }
    }

    /// Comma-separated lowercase terms, or `None` when nothing usable was given
    pub fn terms(&self, name: &str) -> Option<Vec<String>> {
        self.string(name)
            .map(split_terms)
            .filter(|terms| !terms.is_empty())
    }

    /// Boolean-ish flag; absent is false
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).map(is_truthy).unwrap_or(false)
    }
}

fn parse_int(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Expecting integer value for argument {}", name)))
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for RequestArgs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req.uri().query().map(str::to_owned);
        let body = if is_form(req.headers()) {
            Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?
        } else {
            Bytes::new()
        };
        Self::parse(query.as_deref(), &body)
    }
}

/// The `tags` argument of a retag request.
///
/// Keeps "not supplied" distinct from a supplied list. A retag without tags
/// stores null rather than leaving the old tags in place; callers that want
/// a different policy can match on `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsArg {
    Absent,
    Supplied(Vec<String>),
}

impl TagsArg {
    pub fn from_args(args: &RequestArgs, name: &str) -> Self {
        match args.terms(name) {
            Some(tags) => Self::Supplied(tags),
            None => Self::Absent,
        }
    }

    /// Value written to the document's `tags` field
    pub fn into_stored(self) -> Option<Vec<String>> {
        match self {
            Self::Absent => None,
            Self::Supplied(tags) => Some(tags),
        }
    }
}
