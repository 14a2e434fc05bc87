//! REST API client for the planning service

use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::PlanSource;
use crate::common::types::{Plan, PlanRequest, SymbolCatalog, DEFAULT_SETTLEMENT};
use crate::config::types::PlannerConfig;

/// REST API client for the planning service
#[derive(Debug, Clone)]
pub struct PlannerRestClient {
    /// HTTP client
    client: Client,
    /// Base URL of the planner, without trailing slash
    base_url: String,
    /// Settlement currency used when normalizing symbol lists
    settlement: String,
}

impl PlannerRestClient {
    /// Create a new REST client
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| ClientError::Configuration(format!("Invalid planner URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            settlement: DEFAULT_SETTLEMENT.to_string(),
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        Ok(Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )?
        .with_settlement(&config.settlement))
    }

    pub fn with_settlement(mut self, settlement: &str) -> Self {
        self.settlement = settlement.trim().to_uppercase();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the planner is up
    #[instrument(skip(self))]
    pub async fn get_health(&self) -> Result<bool> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let health: HealthResponse = response.json().await?;
        Ok(health.is_up())
    }

    /// Get the list of quotable assets
    ///
    /// Any failure degrades to the default catalog.
    #[instrument(skip(self))]
    pub async fn get_symbols(&self) -> SymbolCatalog {
        match self.try_get_symbols().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Symbol list unavailable, using defaults: {}", e);
                SymbolCatalog::fallback(&self.settlement)
            }
        }
    }

    async fn try_get_symbols(&self) -> Result<SymbolCatalog> {
        let url = format!("{}/api/symbols", self.base_url);
        debug!("Fetching symbols from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let symbols: SymbolsResponse = response.json().await?;
        Ok(symbols.into_catalog(&self.settlement))
    }

    /// Request a plan for one strategy
    #[instrument(skip(self), fields(scenario = %request.scenario))]
    pub async fn post_plan(&self, request: &PlanRequest) -> Result<Plan> {
        let url = format!("{}/api/plan", self.base_url);
        let body = PlanRequestBody {
            base: request.base.clone(),
            quote: request.quote.clone(),
            amount: request.amount.to_f64().unwrap_or_default(),
            scenario: request.scenario,
            depth: request.depth,
        };
        debug!("Posting plan request to: {}", url);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(err) if !err.error.trim().is_empty() => ClientError::Planner(err.error),
                _ => ClientError::HttpStatus {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        let plan: PlanResponse = serde_json::from_str(&text)?;
        if let Some(error) = plan.error.as_ref().filter(|e| !e.trim().is_empty()) {
            return Err(ClientError::Planner(error.clone()));
        }

        Ok(plan.into_plan(request.scenario))
    }
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::HttpStatus {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl PlanSource for PlannerRestClient {
    async fn fetch_plan(&self, request: &PlanRequest) -> Result<Plan> {
        self.post_plan(request).await
    }

    async fn health(&self) -> Result<bool> {
        self.get_health().await
    }

    async fn symbols(&self) -> Result<SymbolCatalog> {
        Ok(self.get_symbols().await)
    }
}
