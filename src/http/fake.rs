use crate::http::*;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::fmt;

/// Records every request and answers with pre-queued responses, in order.
#[derive(Debug, Default)]
pub struct FakeTransport {
    requests: Vec<HttpRequest>,
    responses: VecDeque<FakeResponse>,
}

#[derive(Debug)]
enum FakeResponse {
    Reply { status: u16, body: String },
    Unreachable,
}

impl FakeTransport {
    pub fn reply(mut self, status: u16, body: impl Into<String>) -> Self {
        self.responses.push_back(FakeResponse::Reply {
            status,
            body: body.into(),
        });

        self
    }

    pub fn unreachable(mut self) -> Self {
        self.responses.push_back(FakeResponse::Unreachable);
        self
    }

    pub fn requests(&self) -> &[HttpRequest] {
        &self.requests
    }
}

impl Transport for FakeTransport {
    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.responses.pop_front();
        let description = format!("{} {}", request.method, request.url);

        self.requests.push(request);

        match response {
            Some(FakeResponse::Reply { status, body }) => Ok(HttpResponse { status, body }),

            Some(FakeResponse::Unreachable) => Err(anyhow!("Connection refused")),

            None => Err(anyhow!("No response queued for: {}", description)),
        }
    }
}

impl fmt::Display for FakeTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, request) in self.requests.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }

            writeln!(f, "{} {}", request.method, request.url)?;

            for (name, value) in &request.headers {
                writeln!(f, "{}: {}", name, value)?;
            }

            match &request.body {
                Some(HttpBody::Json(body)) => {
                    writeln!(f, "{}", body)?;
                }

                Some(HttpBody::Form(fields)) => {
                    for (name, value) in fields {
                        writeln!(f, "{}={}", name, value)?;
                    }
                }

                None => (),
            }
        }

        Ok(())
    }
}
