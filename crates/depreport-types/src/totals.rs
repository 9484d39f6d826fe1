use crate::Scope;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Running total of one metric, broken down by scope.
///
/// `total` always equals the sum of the five subtotals: both are only ever
/// changed together through [`TotalsAccumulator::add`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TotalsAccumulator {
    total: u64,
    compile: u64,
    test: u64,
    runtime: u64,
    provided: u64,
    system: u64,
}

impl TotalsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: u64, scope: Scope) {
        self.total += amount;
        *self.slot_mut(scope) += amount;
    }

    pub fn increment(&mut self, scope: Scope) {
        self.add(1, scope);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn subtotal(&self, scope: Scope) -> u64 {
        match scope {
            Scope::Compile => self.compile,
            Scope::Test => self.test,
            Scope::Runtime => self.runtime,
            Scope::Provided => self.provided,
            Scope::System => self.system,
        }
    }

    /// Non-zero subtotals in rendering order (compile, test, runtime, provided, system).
    pub fn breakdown(&self) -> Vec<(Scope, u64)> {
        Scope::TOTALS_ORDER
            .iter()
            .map(|s| (*s, self.subtotal(*s)))
            .filter(|(_, v)| *v > 0)
            .collect()
    }

    /// Render as `total (scope: n, scope: n)` with a caller-supplied number format.
    pub fn render_with<F>(&self, fmt: F) -> String
    where
        F: Fn(u64) -> String,
    {
        let parts: Vec<String> = self
            .breakdown()
            .into_iter()
            .map(|(scope, v)| format!("{}: {}", scope.as_str(), fmt(v)))
            .collect();
        format!("{} ({})", fmt(self.total), parts.join(", "))
    }

    fn slot_mut(&mut self, scope: Scope) -> &mut u64 {
        match scope {
            Scope::Compile => &mut self.compile,
            Scope::Test => &mut self.test,
            Scope::Runtime => &mut self.runtime,
            Scope::Provided => &mut self.provided,
            Scope::System => &mut self.system,
        }
    }
}

impl fmt::Display for TotalsAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(|n| n.to_string()))
    }
}
