use task_list_core::{HttpMethod, HttpRequest, HttpResponse, TransportError};

use crate::error::CliError;

/// Executes core-built requests with reqwest.
///
/// No timeout and no retry: a request that hangs stays pending.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new() -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(CliError::HttpClient)?;
        Ok(Self { http })
    }

    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending");

        let mut builder = self.http.request(method, &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        tracing::debug!(status, "response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
