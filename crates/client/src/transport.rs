//! HTTP seam between the tools and the network

use steamtools_core::UpstreamError;

const USER_AGENT: &str = concat!("steamtools/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One upstream call: URL, query pairs and an optional body
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl UpstreamRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Switch to POST with `body` sent as-is
    pub fn post_body(mut self, body: String) -> Self {
        self.method = Method::Post;
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a request and hands back status and body, whatever the status
pub trait HttpTransport {
    fn send(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// Blocking reqwest client. Must be created and dropped outside an async context.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, UpstreamError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self
                .client
                .post(&request.url)
                .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(request.body.clone().unwrap_or_default()),
        };

        let response = builder
            .query(&request.query)
            .send()
            .map_err(|e| UpstreamError::Transport(format!("Network error: {}", e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| {
                UpstreamError::Transport(format!("Failed to read response: {}", e.without_url()))
            })?;

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_hides_api_key() {
        let transport = ReqwestTransport::new().unwrap();
        let request = UpstreamRequest::get("http://127.0.0.1:1/ISteamUser/GetFriendList/v0001/".to_string())
            .param("key", "SECRET-SERVER-KEY")
            .param("steamid", "76561197960435530");

        let err = transport.send(&request).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Network error: "), "{}", message);
        assert!(!message.contains("SECRET-SERVER-KEY"), "{}", message);
    }
}
