use crate::http::*;
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct BlockingTransport {
    client: reqwest::blocking::Client,
}

impl BlockingTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .context("Couldn't initialize HTTP client")?;

        Ok(Self { client })
    }
}

impl Transport for BlockingTransport {
    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        log::debug!("-> {} {}", request.method, request.url);

        let mut builder = self.client.request(method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            Some(HttpBody::Json(body)) => builder.header(CONTENT_TYPE, "application/json").body(body),
            Some(HttpBody::Form(fields)) => builder.form(&fields),
            None => builder,
        };

        let response = builder
            .send()
            .with_context(|| format!("Couldn't send request: {} {}", request.method, request.url))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .context("Couldn't read response body")?;

        log::debug!("<- {} ({} bytes)", status, body.len());

        Ok(HttpResponse { status, body })
    }
}
