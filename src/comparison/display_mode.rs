//! Per-scenario display flags and the session context that carries them

use std::collections::BTreeSet;

use crate::common::format::{FormatPolicy, NumberFormatter};
use crate::common::i18n::Locale;
use crate::common::types::{Strategy, DEFAULT_SETTLEMENT};

use super::view::ViewOptions;

/// Scenario indices with equalized display active
///
/// Only toggled by the user; data fetches never write here except for the
/// wholesale reset when a new comparison set arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayModeStore {
    equalized: BTreeSet<usize>,
}

impl DisplayModeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag for a scenario index, returning the new state
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.equalized.remove(&index) {
            false
        } else {
            self.equalized.insert(index);
            true
        }
    }

    pub fn is_equalized(&self, index: usize) -> bool {
        self.equalized.contains(&index)
    }

    pub fn is_equalized_for(&self, strategy: Strategy) -> bool {
        self.is_equalized(strategy.index())
    }

    pub fn reset(&mut self) {
        self.equalized.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.equalized.is_empty()
    }
}

/// Presentation state passed explicitly into view building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub locale: Locale,
    pub policy: FormatPolicy,
    pub settlement: String,
    pub display_modes: DisplayModeStore,
    pub view: ViewOptions,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(Locale::default(), FormatPolicy::default(), DEFAULT_SETTLEMENT)
    }
}

impl SessionContext {
    pub fn new(locale: Locale, policy: FormatPolicy, settlement: &str) -> Self {
        Self {
            locale,
            policy,
            settlement: settlement.trim().to_uppercase(),
            display_modes: DisplayModeStore::new(),
            view: ViewOptions::default(),
        }
    }

    pub fn with_view(mut self, view: ViewOptions) -> Self {
        self.view = view;
        self
    }

    pub fn formatter(&self) -> NumberFormatter {
        NumberFormatter::new(self.policy, self.locale)
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_membership() {
        let mut store = DisplayModeStore::new();
        assert!(store.toggle(0));
        assert!(store.is_equalized(0));
        assert!(store.is_equalized_for(Strategy::BestSingle));
        assert!(!store.toggle(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_accepts_any_index() {
        let mut store = DisplayModeStore::new();
        store.toggle(2);
        store.toggle(7);
        assert!(store.is_equalized(2));
        assert!(store.is_equalized(7));
        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn test_context_normalizes_settlement() {
        let ctx = SessionContext::new(Locale::Ru, FormatPolicy::default(), " usdt ");
        assert_eq!(ctx.settlement, "USDT");
        assert_eq!(ctx.formatter().locale(), Locale::Ru);
    }
}
