use std::time::Duration;

use serde::{Deserialize, Serialize};

// The advice endpoint responds with a small envelope:
// { "slip": { "id": 42, "advice": "Take time for yourself." } }

#[derive(Debug, Deserialize)]
pub struct AdviceSlip {
    pub id: i64,
    pub advice: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceResponse {
    pub slip: AdviceSlip,
}

/// Tri-state advice view: loading flag, last fetched text, last error.
/// A failed refresh keeps the previous text alongside the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdviceState {
    pub text: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// One-shot client for the advice endpoint. No retries, no caching; any
/// transport, status, or parse failure is a single opaque error.
#[derive(Clone)]
pub struct AdviceClient {
    client: reqwest::Client,
    url: String,
}

impl AdviceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn fetch_advice(&self) -> anyhow::Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("advice endpoint returned {}", response.status());
        }

        let envelope: AdviceResponse = response.json().await?;
        Ok(envelope.slip.advice)
    }
}
