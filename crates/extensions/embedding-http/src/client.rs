//! Shared HTTP plumbing.

use std::time::Duration;

use propsearch_protocols::EmbeddingError;

pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// POST `body` with bearer auth, mapping transport and status failures.
pub(crate) async fn post_json<B: serde::Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<reqwest::Response, EmbeddingError> {
    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| EmbeddingError::Failed(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(EmbeddingError::ApiError { status, message });
    }

    Ok(response)
}
