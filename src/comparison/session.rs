//! Front-end comparison state: the current set or error plus display flags

use tracing::{debug, info, warn};

use super::comparator::{ScenarioComparator, ScenarioComparisonSet};
use super::display_mode::SessionContext;
use super::view::{derive_view, AllocationView};
use crate::common::errors::ValidationError;
use crate::common::format::parse_amount;
use crate::common::i18n::Locale;
use crate::common::traits::PlanSource;

/// What the front-end should draw
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    /// No calculation yet
    Idle,
    /// Single error panel
    Error(String),
    /// One view per strategy in fixed order
    Scenarios(Vec<AllocationView>),
}

pub struct ComparisonSession<S> {
    comparator: ScenarioComparator<S>,
    ctx: SessionContext,
    current: Option<ScenarioComparisonSet>,
    error: Option<String>,
    validation: Option<String>,
}

impl<S: PlanSource> ComparisonSession<S> {
    pub fn new(comparator: ScenarioComparator<S>, mut ctx: SessionContext) -> Self {
        ctx.settlement = comparator.settlement().to_string();
        Self {
            comparator,
            ctx,
            current: None,
            error: None,
            validation: None,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn current(&self) -> Option<&ScenarioComparisonSet> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn comparator(&self) -> &ScenarioComparator<S> {
        &self.comparator
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.ctx.set_locale(locale);
    }

    /// Run a comparison from raw form input
    ///
    /// Invalid input is rejected before any request and leaves the current
    /// set or error untouched; the localized reason is kept in `validation`.
    /// On a successful fetch the previous set is replaced and every equalize
    /// flag is cleared. On a failed fetch the set is dropped and one message
    /// is kept.
    pub async fn calculate(&mut self, base: &str, quote: &str, amount: &str) -> bool {
        let request = parse_amount(amount)
            .ok_or(ValidationError::BadAmount)
            .and_then(|amount| self.comparator.request(base, quote, amount));

        let request = match request {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected input: {}", e);
                self.validation = Some(e.localized(self.ctx.locale).to_string());
                return false;
            }
        };
        self.validation = None;

        match self.comparator.compare_request(request).await {
            Ok(set) => {
                info!("Comparison ready for {}/{}", set.request.base, set.request.quote);
                self.current = Some(set);
                self.error = None;
                self.ctx.display_modes.reset();
                true
            }
            Err(e) => {
                warn!("Comparison failed: {}", e);
                self.current = None;
                self.error = Some(e.user_message(self.ctx.locale));
                false
            }
        }
    }

    /// Reason the last input was rejected, if it was
    pub fn validation(&self) -> Option<&str> {
        self.validation.as_deref()
    }

    /// Flip the equalize flag of a scenario index, returning the new state
    pub fn toggle(&mut self, index: usize) -> bool {
        self.ctx.display_modes.toggle(index)
    }

    /// Derive the views from the held set under the current flags
    pub fn render(&self) -> ComparisonView {
        if let Some(error) = &self.error {
            return ComparisonView::Error(error.clone());
        }
        match &self.current {
            Some(set) => ComparisonView::Scenarios(
                set.iter().map(|plan| derive_view(plan, &self.ctx)).collect(),
            ),
            None => ComparisonView::Idle,
        }
    }
}
