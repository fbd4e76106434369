//! Risk aggregation over a complete scenario set.
//!
//! - `component`: per-component and facility figures, `RiskValue`
//! - `curves`: F/N and F/G curves
//! - `pareto`: contribution ranking with an optional "other" bucket
//! - `matrix`: risk-matrix rows and the `AcceptanceCriterion` seam
//! - `aggregator`: `RiskAggregator` and `FacilitySummary`

mod aggregator;
mod component;
mod curves;
mod matrix;
mod pareto;

pub use aggregator::*;
pub use component::*;
pub use curves::*;
pub use matrix::*;
pub use pareto::*;
