//! Concurrent fetch of the three strategy plans

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::common::errors::{ClientError, Result, ValidationError};
use crate::common::traits::PlanSource;
use crate::common::types::{Plan, PlanRequest, Strategy, DEFAULT_SETTLEMENT};
use crate::config::types::PlannerConfig;

/// The three plans of one calculation, keyed by strategy
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioComparisonSet {
    /// Request that produced the set, with the strategy of the first fetch
    pub request: PlanRequest,
    pub plans: BTreeMap<Strategy, Plan>,
    pub fetched_at: DateTime<Utc>,
}

impl ScenarioComparisonSet {
    pub fn plan(&self, strategy: Strategy) -> Option<&Plan> {
        self.plans.get(&strategy)
    }

    /// Plans in fixed strategy order
    pub fn iter(&self) -> impl Iterator<Item = &Plan> {
        self.plans.values()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Fires one plan request per strategy and joins them
pub struct ScenarioComparator<S> {
    source: S,
    settlement: String,
    depth: Option<u32>,
    timeout: Duration,
}

impl<S: PlanSource> ScenarioComparator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            settlement: DEFAULT_SETTLEMENT.to_string(),
            depth: None,
            timeout: Duration::from_secs(20),
        }
    }

    pub fn from_config(source: S, config: &PlannerConfig) -> Self {
        Self::new(source)
            .with_settlement(&config.settlement)
            .with_depth(config.depth)
            .with_timeout(Duration::from_secs(config.comparison_timeout_seconds))
    }

    pub fn with_settlement(mut self, settlement: &str) -> Self {
        self.settlement = settlement.trim().to_uppercase();
        self
    }

    pub fn with_depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn settlement(&self) -> &str {
        &self.settlement
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate input, then fetch all three strategies concurrently
    ///
    /// Fails as a whole when any single request fails.
    #[instrument(skip(self))]
    pub async fn compare(
        &self,
        base: &str,
        quote: &str,
        amount: Decimal,
    ) -> Result<ScenarioComparisonSet> {
        let request = self.request(base, quote, amount)?;
        self.compare_request(request).await
    }

    /// Build the validated request the comparison would send
    pub fn request(
        &self,
        base: &str,
        quote: &str,
        amount: Decimal,
    ) -> std::result::Result<PlanRequest, ValidationError> {
        Ok(PlanRequest::new(base, quote, amount, Strategy::BestSingle)?.with_depth(self.depth))
    }

    /// Fetch all three strategies for an already validated request
    #[instrument(skip(self, request), fields(base = %request.base, quote = %request.quote))]
    pub async fn compare_request(&self, request: PlanRequest) -> Result<ScenarioComparisonSet> {
        let requests: Vec<PlanRequest> = Strategy::ALL
            .iter()
            .map(|s| request.for_strategy(*s))
            .collect();

        info!(
            "Comparing {}/{} for amount {} ({} strategies)",
            request.base,
            request.quote,
            request.amount,
            requests.len()
        );

        let fetches = requests.iter().map(|r| self.source.fetch_plan(r));
        let plans = match tokio::time::timeout(self.timeout, try_join_all(fetches)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Comparison exceeded {:?}", self.timeout);
                return Err(ClientError::Timeout(format!(
                    "plan requests did not finish within {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        // try_join_all preserves input order
        let plans = requests
            .iter()
            .zip(plans)
            .map(|(req, plan)| (req.scenario, with_request_identity(plan, req)))
            .collect();

        debug!("Comparison set complete");

        Ok(ScenarioComparisonSet {
            request,
            plans,
            fetched_at: Utc::now(),
        })
    }
}

/// Pin the plan to the strategy it was requested for and fill a missing pair
fn with_request_identity(mut plan: Plan, request: &PlanRequest) -> Plan {
    plan.scenario = request.scenario;
    if plan.base.trim().is_empty() {
        plan.base = request.base.clone();
    }
    if plan.quote.trim().is_empty() {
        plan.quote = request.quote.clone();
    }
    plan
}
