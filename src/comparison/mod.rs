//! Comparison module - Normalization, ranking and view derivation for plans
//!
//! Everything here except the comparator fetch is synchronous and pure over
//! already-fetched plans.

pub mod comparator;
pub mod display_mode;
pub mod normalizer;
pub mod ranker;
pub mod session;
pub mod text;
pub mod view;

pub use comparator::{ScenarioComparator, ScenarioComparisonSet};
pub use display_mode::{DisplayModeStore, SessionContext};
pub use normalizer::{normalize_leg, normalize_plan, NormalizedLeg};
pub use ranker::{rank_legs, DiffMode, Rank, RankedLegView, RankedLegs};
pub use session::{ComparisonSession, ComparisonView};
pub use text::{render_allocation, render_comparison};
pub use view::{build_view, derive_view, AllocationView, RowStyle, ViewOptions};
