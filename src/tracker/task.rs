use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::time::{format_timestamp, parse_timestamp};

pub const DEFAULT_CURRENCY_NAME: &str = "steps";

/// Total of a task at the moment of an increment.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Snapshot {
    pub total_currency: u64,
    /// Local ISO-8601 datetime. Kept as written so that a malformed value is reported where it's
    /// used instead of making the whole save file unreadable.
    pub timestamp: String,
}

impl Snapshot {
    pub fn new(total_currency: u64, moment: NaiveDateTime) -> Self {
        Self {
            total_currency,
            timestamp: format_timestamp(moment),
        }
    }

    pub fn moment(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// A tracked goal. Currency only ever grows and every increment is recorded at the front of
/// `history`.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Task {
    name: String,
    currency_name: String,
    currency: u64,
    history: Vec<Snapshot>,
}

impl Task {
    pub fn new(name: impl Into<String>, currency_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            currency_name: currency_name.into(),
            currency: 0,
            history: vec![],
        }
    }

    pub fn with_default_currency(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_CURRENCY_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency_name(&self) -> &str {
        &self.currency_name
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    /// Newest first.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Returns false and leaves the task untouched if the total would overflow.
    pub fn increment(&mut self, step: u64, now: NaiveDateTime) -> bool {
        let Some(currency) = self.currency.checked_add(step) else {
            return false;
        };
        self.currency = currency;
        self.history.insert(0, Snapshot::new(self.currency, now));
        true
    }

    #[cfg(test)]
    pub(crate) fn with_history(mut self, history: Vec<Snapshot>) -> Self {
        self.currency = history.first().map_or(0, |v| v.total_currency);
        self.history = history;
        self
    }
}
