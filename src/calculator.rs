//! Cost calculation over the rate table.
//!
//! Everything here is a pure function of [`CalcInput`] and a [`RateTable`].
//! Storage and network rates are flat amounts: they do not scale with the
//! token count or with processing time.

use serde::Serialize;
use std::fmt;

use crate::rates::{RateTable, Rgb};

/// USD to EUR conversion applied to compute rates.
pub const USD_TO_EUR: f64 = 0.91;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Assumed processing speed in tokens per second, bounded to `[MIN, MAX]` in
/// steps of `STEP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Throughput(u32);

impl Throughput {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 100;
    pub const STEP: u32 = 5;
    pub const DEFAULT: Throughput = Throughput(50);

    /// Exact constructor; `None` if out of range or off-step.
    pub fn new(value: u32) -> Option<Self> {
        let in_range = (Self::MIN..=Self::MAX).contains(&value);
        (in_range && value % Self::STEP == 0).then_some(Self(value))
    }

    /// Clamp into range and snap down to the nearest step.
    pub fn clamped(value: u32) -> Self {
        let v = value.clamp(Self::MIN, Self::MAX);
        Self(v - v % Self::STEP)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increase(self) -> Self {
        Self::clamped(self.0.saturating_add(Self::STEP))
    }

    pub fn decrease(self) -> Self {
        Self::clamped(self.0.saturating_sub(Self::STEP))
    }

    /// Position within the range, 0.0 at `MIN` and 1.0 at `MAX`.
    pub fn fraction(self) -> f64 {
        (self.0 - Self::MIN) as f64 / (Self::MAX - Self::MIN) as f64
    }
}

impl Default for Throughput {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inputs for one recalculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcInput {
    /// Finite and non-negative.
    pub tokens: f64,
    pub throughput: Throughput,
}

/// Cost of one provider, in EUR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub provider_name: String,
    pub compute_cost: f64,
    pub storage_cost: f64,
    pub network_cost: f64,
    pub total_cost: f64,
    pub display_color: Rgb,
}

/// Per-provider breakdowns in rate-table order, plus the shared processing time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub tokens: f64,
    pub throughput: Throughput,
    pub total_hours: f64,
    pub breakdowns: Vec<CostBreakdown>,
}

impl CalculationResult {
    pub fn get(&self, provider: &str) -> Option<&CostBreakdown> {
        self.breakdowns.iter().find(|b| b.provider_name == provider)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CostBreakdown> {
        self.breakdowns.iter()
    }

    pub fn processing_time(&self) -> ProcessingTime {
        ProcessingTime::from_hours(self.total_hours)
    }

    /// Provider with the lowest total cost. Ties go to the earlier entry.
    pub fn cheapest(&self) -> Option<&CostBreakdown> {
        self.breakdowns
            .iter()
            .reduce(|best, b| if b.total_cost < best.total_cost { b } else { best })
    }
}

/// Hours needed to process `tokens` at `throughput`.
pub fn processing_hours(tokens: f64, throughput: Throughput) -> f64 {
    let total_seconds = tokens / throughput.get() as f64;
    total_seconds / SECONDS_PER_HOUR
}

/// Compute the cost of processing `input.tokens` on every provider in `rates`.
pub fn calculate(input: &CalcInput, rates: &RateTable) -> CalculationResult {
    let total_hours = processing_hours(input.tokens, input.throughput);

    let breakdowns = rates
        .iter()
        .map(|rate| {
            let compute_cost = total_hours * (rate.compute_rate * USD_TO_EUR);
            let storage_cost = rate.storage_rate;
            let network_cost = rate.network_rate;
            CostBreakdown {
                provider_name: rate.name.clone(),
                compute_cost,
                storage_cost,
                network_cost,
                total_cost: compute_cost + storage_cost + network_cost,
                display_color: rate.display_color,
            }
        })
        .collect();

    tracing::debug!(
        tokens = input.tokens,
        throughput = input.throughput.get(),
        total_hours,
        "recalculated costs"
    );

    CalculationResult {
        tokens: input.tokens,
        throughput: input.throughput,
        total_hours,
        breakdowns,
    }
}

/// Human-readable processing time: hours, or days and hours from 24h upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingTime {
    pub hours: f64,
}

impl ProcessingTime {
    pub fn from_hours(hours: f64) -> Self {
        Self { hours }
    }

    pub fn days(&self) -> f64 {
        self.hours / 24.0
    }
}

impl fmt::Display for ProcessingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.days();
        if days >= 1.0 {
            write!(f, "{days:.1} days ({:.1} hours)", self.hours)
        } else {
            write!(f, "{:.1} hours", self.hours)
        }
    }
}
