//! Trait definitions for planner clients

use async_trait::async_trait;

use super::errors::Result;
use super::types::{Plan, PlanRequest, SymbolCatalog};

/// Source of execution plans (the remote planning service or a test double)
///
/// The comparison engine only depends on this trait, so transports can be
/// swapped without touching ranking or view code.
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Fetch one strategy's plan
    ///
    /// Implementations must fail on transport errors, non-2xx responses and
    /// 2xx bodies carrying an `error` field.
    async fn fetch_plan(&self, request: &PlanRequest) -> Result<Plan>;

    /// Liveness of the planning service
    async fn health(&self) -> Result<bool>;

    /// Assets the planning service can quote
    async fn symbols(&self) -> Result<SymbolCatalog>;
}
