//! Aggregate metric reporting.
//!
//! Reporting is read-only bookkeeping over the metadata store: each strategy
//! summarizes its own counters into a flat list of named means and totals.
//! Reports are well-defined at any point in the run, including before the
//! first access, where every mean is zero.

use std::fmt;

/// One named aggregate value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metric {
    /// Metric name, e.g. `"avg_age"`.
    pub name: &'static str,
    /// Aggregate value (a mean or a total, per the name).
    pub value: f64,
}

/// Aggregate metrics for one policy instance.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyReport {
    /// Name of the strategy that produced the report.
    pub strategy: &'static str,
    /// Aggregates in a strategy-defined order.
    pub metrics: Vec<Metric>,
}

impl PolicyReport {
    /// Looks up a metric by name.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|metric| metric.name == name)
            .map(|metric| metric.value)
    }
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stats:", self.strategy)?;
        for (i, metric) in self.metrics.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{} = {:.4}", metric.name, metric.value)?;
        }
        Ok(())
    }
}

/// Mean of an iterator of values already widened to `f64`.
///
/// Empty input yields zero, which keeps pre-first-access reports defined.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0_f64, 0_u64), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
