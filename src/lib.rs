//! PlanCompare Library
//!
//! Client for a remote multi-exchange execution planner that fetches the
//! three allocation strategies for one order and turns them into comparable,
//! ranked, localized tables.

pub mod common;
pub mod comparison;
pub mod config;
pub mod planner;

// Re-export commonly used types
pub use common::errors::{ClientError, Result, ValidationError};
pub use common::format::{FieldClass, FormatPolicy, NumberFormatter};
pub use common::i18n::Locale;
pub use common::traits::PlanSource;
pub use common::types::{Leg, Plan, PlanRequest, Strategy, SymbolCatalog};
pub use config::types::AppConfig;
pub use planner::rest::PlannerRestClient;

// Comparison types
pub use comparison::{
    AllocationView, ComparisonSession, ComparisonView, DisplayModeStore, ScenarioComparator,
    ScenarioComparisonSet, SessionContext,
};
