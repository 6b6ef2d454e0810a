use blog_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::debug;

/// Blocking transport backed by a ureq agent.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as data
/// and the core client decides what they mean. No timeout is configured.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = req.method.as_str(), url = %req.url, "sending request");
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(&req.url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.url).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "received response");
        Ok(HttpResponse::new(status, body))
    }
}
