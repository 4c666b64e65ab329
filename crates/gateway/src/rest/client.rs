use std::time::Duration;

use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// Upstream error bodies are clipped to this many bytes before logging
const MAX_ERROR_BODY: usize = 512;

/// Build the pooled HTTP client every adapter shares
pub fn build_http_client(timeout: Duration) -> Result<Client, RestError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    let client = Client::builder()
        .user_agent(concat!("tickerhub/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// JSON-over-HTTP client bound to one exchange's base URL
#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RestClient { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `query` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;
        self.handle_response(path, resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(RestError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body: clip(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| RestError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

fn clip(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = build_http_client(Duration::from_secs(1)).unwrap();
        let rest = RestClient::new(client, "http://localhost:9000/");
        assert_eq!(rest.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_clip_long_body() {
        let body = "x".repeat(2_000);
        let clipped = clip(&body);
        assert_eq!(clipped.len(), MAX_ERROR_BODY + 3);
        assert!(clipped.ends_with("..."));
        assert_eq!(clip("short"), "short");
    }

    #[test]
    fn test_clip_respects_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY);
        let clipped = clip(&body);
        assert!(clipped.ends_with("..."));
    }
}
