use crate::errors::Result;
use crate::models::RpcRequest;
use reqwest::Client;

/// HTTP layer: one JSON POST per call, nothing else.
///
/// The body is returned for any HTTP status; Deribit carries its JSON-RPC
/// `error` envelope on non-2xx responses too, so interpreting the body is
/// the caller's job. No retries, no caching, no timeout beyond reqwest's
/// defaults.
pub struct Transport {
    http_client: Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST one JSON-RPC request to `<base_url>/<method>`, with an
    /// `Authorization: Bearer` header iff a token is supplied.
    pub async fn post(
        &self,
        method: &str,
        request: &RpcRequest,
        bearer: Option<&str>,
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url, method);

        let mut builder = self.http_client.post(&url).json(request);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let body = response.text().await?;

        Ok(body)
    }
}
