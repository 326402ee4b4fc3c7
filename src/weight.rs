//! Multi-attribute link weight model.
//!
//! Maps a [`LinkAttributes`] record plus a [`Strategy`] to a single scalar
//! weight consumed by every search and optimization algorithm. The strategy
//! enum is closed and matched exhaustively: adding a strategy is a
//! compile-time exhaustiveness failure, never a silent default branch.
//!
//! The `BalanceLoad` composite models nonlinear coupling between attributes:
//! effective latency degrades quadratically with utilization, effective
//! bandwidth shrinks with packet loss, and reliability decays with both.

use crate::graph::LinkAttributes;

/// Objective selecting which scalar-weight formula is applied per edge.
///
/// Threaded through every weight lookup and algorithm call.
///
/// # Examples
///
/// ```
/// use netroute::graph::LinkAttributes;
/// use netroute::weight::{composite_weight, Strategy};
///
/// let attrs = LinkAttributes::from_weight(4.0);
/// assert_eq!(composite_weight(&attrs, Strategy::Uniform), 1.0);
/// assert_eq!(composite_weight(&attrs, Strategy::MinimizeLatency), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Constant weight 1.0; hop-count shortest paths.
    Uniform,
    /// Raw link latency.
    MinimizeLatency,
    /// Composite of effective latency, effective bandwidth, cost, and
    /// dynamic reliability (see module docs).
    BalanceLoad,
    /// Inverse bandwidth, so higher-capacity links weigh less.
    MaximizeBandwidth,
    /// Raw link cost.
    MinimizeCost,
    /// Condition-dependent: reliability-dominated under congestion,
    /// bandwidth-dominated under loss, otherwise `BalanceLoad`.
    Adaptive,
}

impl Strategy {
    /// Short human-readable name used in algorithm labels and reports.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Uniform => "Uniform",
            Strategy::MinimizeLatency => "Min-Latency",
            Strategy::BalanceLoad => "Balance-Load",
            Strategy::MaximizeBandwidth => "Max-Bandwidth",
            Strategy::MinimizeCost => "Min-Cost",
            Strategy::Adaptive => "Adaptive",
        }
    }

    /// All strategies, for roster-style iteration in tests and reports.
    pub fn all() -> [Strategy; 6] {
        [
            Strategy::Uniform,
            Strategy::MinimizeLatency,
            Strategy::BalanceLoad,
            Strategy::MaximizeBandwidth,
            Strategy::MinimizeCost,
            Strategy::Adaptive,
        ]
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::MinimizeLatency
    }
}

/// Computes the scalar weight of a link under the given strategy.
///
/// Stateless and pure. `attrs.bandwidth > 0` is a precondition guaranteed by
/// the [`LinkAttributes`] constructors, not re-checked here.
pub fn composite_weight(attrs: &LinkAttributes, strategy: Strategy) -> f64 {
    match strategy {
        Strategy::Uniform => 1.0,
        Strategy::MinimizeLatency => attrs.latency,
        Strategy::BalanceLoad => balanced_weight(attrs),
        Strategy::MaximizeBandwidth => 1.0 / attrs.bandwidth,
        Strategy::MinimizeCost => attrs.cost,
        Strategy::Adaptive => adaptive_weight(attrs),
    }
}

/// Latency under load: grows quadratically with utilization.
///
/// `latency * (1 + 3u²)` — an idle link keeps its base latency, a fully
/// utilized link is 4x slower.
pub fn effective_latency(base_latency: f64, utilization: f64) -> f64 {
    base_latency * (1.0 + 3.0 * utilization * utilization)
}

/// Usable bandwidth after packet loss: `bandwidth * (1 - loss)`.
pub fn effective_bandwidth(max_bandwidth: f64, packet_loss: f64) -> f64 {
    max_bandwidth * (1.0 - packet_loss)
}

/// Reliability degraded by loss and load, clamped at zero.
///
/// `max(0, 1 - (0.7·loss + 0.3·util))` — packet loss dominates the penalty.
pub fn dynamic_reliability(packet_loss: f64, utilization: f64) -> f64 {
    let penalty = packet_loss * 0.7 + utilization * 0.3;
    (1.0 - penalty).max(0.0)
}

fn balanced_weight(attrs: &LinkAttributes) -> f64 {
    let eff_latency = effective_latency(attrs.latency, attrs.utilization);
    let eff_bandwidth = effective_bandwidth(attrs.bandwidth, attrs.packet_loss);
    let reliability = dynamic_reliability(attrs.packet_loss, attrs.utilization);

    eff_latency * 0.5
        + (1.0 / eff_bandwidth) * 0.2
        + attrs.cost * 0.15
        + (1.0 - reliability) * 0.15
}

fn adaptive_weight(attrs: &LinkAttributes) -> f64 {
    if attrs.utilization > 0.8 {
        // congested: reliability dominates
        (1.0 - attrs.reliability) * 100.0
    } else if attrs.packet_loss > 0.1 {
        // lossy: prefer capacity
        1.0 / attrs.bandwidth
    } else {
        balanced_weight(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use super::Strategy;

    fn attrs(
        latency: f64,
        bandwidth: f64,
        packet_loss: f64,
        utilization: f64,
        cost: f64,
        reliability: f64,
    ) -> LinkAttributes {
        LinkAttributes {
            latency,
            bandwidth,
            packet_loss,
            utilization,
            cost,
            reliability,
        }
    }

    #[test]
    fn test_uniform_ignores_attributes() {
        let a = attrs(12.0, 100.0, 0.3, 0.9, 7.0, 0.2);
        assert_eq!(composite_weight(&a, Strategy::Uniform), 1.0);
    }

    #[test]
    fn test_latency_and_cost_are_raw() {
        let a = attrs(12.5, 100.0, 0.0, 0.0, 3.25, 1.0);
        assert_eq!(composite_weight(&a, Strategy::MinimizeLatency), 12.5);
        assert_eq!(composite_weight(&a, Strategy::MinimizeCost), 3.25);
    }

    #[test]
    fn test_bandwidth_is_inverse() {
        let a = attrs(1.0, 50.0, 0.0, 0.0, 1.0, 1.0);
        assert!((composite_weight(&a, Strategy::MaximizeBandwidth) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_effective_latency_congestion_penalty() {
        assert_eq!(effective_latency(10.0, 0.0), 10.0);
        // full utilization quadruples latency
        assert!((effective_latency(10.0, 1.0) - 40.0).abs() < 1e-12);
        // quadratic, not linear
        assert!((effective_latency(10.0, 0.5) - 17.5).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_reliability_clamped() {
        assert_eq!(dynamic_reliability(0.0, 0.0), 1.0);
        assert_eq!(dynamic_reliability(1.0, 1.0), 0.0);
        assert!((dynamic_reliability(0.1, 0.2) - 0.87).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_composite_formula() {
        let a = attrs(10.0, 100.0, 0.1, 0.5, 2.0, 1.0);
        let eff_lat = effective_latency(10.0, 0.5);
        let eff_bw = effective_bandwidth(100.0, 0.1);
        let rel = dynamic_reliability(0.1, 0.5);
        let expected = eff_lat * 0.5 + (1.0 / eff_bw) * 0.2 + 2.0 * 0.15 + (1.0 - rel) * 0.15;
        assert!((composite_weight(&a, Strategy::BalanceLoad) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_adaptive_congested_branch() {
        let a = attrs(10.0, 100.0, 0.0, 0.9, 2.0, 0.6);
        // utilization > 0.8: reliability penalty dominates
        assert!((composite_weight(&a, Strategy::Adaptive) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_adaptive_lossy_branch() {
        let a = attrs(10.0, 25.0, 0.2, 0.5, 2.0, 0.9);
        assert!((composite_weight(&a, Strategy::Adaptive) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_adaptive_delegates_to_balanced() {
        let a = attrs(10.0, 100.0, 0.05, 0.5, 2.0, 0.9);
        assert_eq!(
            composite_weight(&a, Strategy::Adaptive),
            composite_weight(&a, Strategy::BalanceLoad)
        );
    }

    #[test]
    fn test_strategy_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            Strategy::all().iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), 6);
    }

    proptest! {
        #[test]
        fn prop_uniform_is_always_one(
            latency in 0.0..1e6f64,
            bandwidth in 0.001..1e6f64,
            loss in 0.0..1.0f64,
            util in 0.0..1.0f64,
            cost in 0.0..1e6f64,
            rel in 0.0..1.0f64,
        ) {
            let a = attrs(latency, bandwidth, loss, util, cost, rel);
            prop_assert_eq!(composite_weight(&a, Strategy::Uniform), 1.0);
        }

        #[test]
        fn prop_latency_strategy_returns_latency(
            latency in 0.0..1e6f64,
            bandwidth in 0.001..1e6f64,
        ) {
            let a = attrs(latency, bandwidth, 0.0, 0.0, 0.0, 1.0);
            prop_assert_eq!(composite_weight(&a, Strategy::MinimizeLatency), latency);
        }

        #[test]
        fn prop_adaptive_matches_balanced_in_normal_conditions(
            latency in 0.0..1e3f64,
            bandwidth in 0.01..1e3f64,
            loss in 0.0..0.1f64,
            util in 0.0..0.8f64,
            cost in 0.0..1e3f64,
            rel in 0.0..1.0f64,
        ) {
            // util <= 0.8 and loss <= 0.1: Adaptive must delegate
            let a = attrs(latency, bandwidth, loss, util, cost, rel);
            prop_assert_eq!(
                composite_weight(&a, Strategy::Adaptive),
                composite_weight(&a, Strategy::BalanceLoad)
            );
        }

        #[test]
        fn prop_weights_are_finite_and_nonnegative(
            latency in 0.0..1e6f64,
            bandwidth in 0.001..1e6f64,
            loss in 0.0..0.99f64,
            util in 0.0..1.0f64,
            cost in 0.0..1e6f64,
            rel in 0.0..1.0f64,
        ) {
            let a = attrs(latency, bandwidth, loss, util, cost, rel);
            for strategy in Strategy::all() {
                let w = composite_weight(&a, strategy);
                prop_assert!(w.is_finite(), "{:?} produced {}", strategy, w);
                prop_assert!(w >= 0.0, "{:?} produced {}", strategy, w);
            }
        }
    }
}
