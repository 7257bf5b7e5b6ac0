mod blocking;

#[cfg(test)]
mod fake;

pub use self::blocking::*;

#[cfg(test)]
pub use self::fake::*;

use anyhow::Result;
use std::fmt;

/// Sends a single HTTP request and hands back whatever the server answered.
///
/// Non-2xx statuses are _not_ errors at this level - interpreting them is up
/// to the caller; only failures to reach the server (or to read its answer)
/// end up as `Err`.
pub trait Transport {
    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpBody {
    Json(String),
    Form(Vec<(String, String)>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Default::default(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json(mut self, body: impl Into<String>) -> Self {
        self.body = Some(HttpBody::Json(body.into()));
        self
    }

    pub fn with_form<'a>(mut self, fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();

        self.body = Some(HttpBody::Form(fields));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
