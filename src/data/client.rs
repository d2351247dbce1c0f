use anyhow::{Context, Result};

use crate::data::models::{SimulationRequest, SimulationResponse};

const SIMULATION_PATH: &str = "simulator/simulation/";

/// Thin client for the simulator API. One operation: submit a request,
/// get the finished simulation back. No retries, no backoff; errors are
/// returned to the caller, which keeps them out of the UI thread.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    http: reqwest::Client,
    base_url: String,
}

impl SimulationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, SIMULATION_PATH)
    }

    /// POST the request and decode the response. Covers transport
    /// failures, non-2xx statuses, undecodable bodies and misaligned
    /// response arrays; the caller decides how to surface them.
    pub async fn submit(&self, request: &SimulationRequest) -> Result<SimulationResponse> {
        let url = self.endpoint();
        tracing::info!("Submitting {} simulation for {}", request.strategy.label(), request.symbol);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach simulator at {url}"))?
            .error_for_status()
            .context("Simulator rejected the request")?;

        let parsed: SimulationResponse = response
            .json()
            .await
            .context("Failed to decode simulation response")?;
        parsed
            .validate()
            .context("Malformed simulation response")?;

        tracing::info!("Simulation {} finished with {} data points", parsed.id, parsed.values.len());
        Ok(parsed)
    }
}
