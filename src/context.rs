//! Request context.
//!
//! A context is a small string-to-string map. The only key the bandits in this
//! crate interpret is [`PREVIOUS_ACTION`]: the arm most recently confirmed in a
//! sequential chain. A missing context or a missing key both mean "no previous
//! action", which is arm `0`.

use std::collections::BTreeMap;

use crate::{BanditError, Result};

/// Context key carrying the previously observed arm index.
pub const PREVIOUS_ACTION: &str = "previous_action";

/// Discrete request context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
    values: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with only `previous_action` set.
    pub fn with_previous_action(arm: usize) -> Self {
        let mut ctx = Self::new();
        ctx.insert(PREVIOUS_ACTION, arm.to_string());
        ctx
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parsed `previous_action`, defaulting to `0` when absent.
    ///
    /// The value is not range-checked here; bandits check it against their own
    /// arm count.
    pub fn previous_action(&self) -> Result<usize> {
        match self.get(PREVIOUS_ACTION) {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| BanditError::InvalidContext {
                    key: PREVIOUS_ACTION.to_string(),
                    value: raw.to_string(),
                }),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// `previous_action` of an optional context (`0` when there is none).
pub(crate) fn previous_action(context: Option<&Context>) -> Result<usize> {
    context.map_or(Ok(0), Context::previous_action)
}
