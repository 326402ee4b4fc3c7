//! Per-edge link attribute record.

/// The six quality-of-service attributes carried by every directed edge.
///
/// Invariants (enforced by the constructors, assumed by the weight model):
/// `latency >= 0`, `bandwidth > 0`, `packet_loss` and `utilization` and
/// `reliability` in `[0, 1]`, `cost >= 0`.
///
/// # Examples
///
/// ```
/// use netroute::graph::LinkAttributes;
///
/// let link = LinkAttributes::new(5.0, 100.0, 0.01, 0.3, 2.0, 0.99);
/// assert_eq!(link.latency, 5.0);
///
/// // Scalar form: weight becomes both latency and cost.
/// let plain = LinkAttributes::from_weight(3.0);
/// assert_eq!(plain.latency, 3.0);
/// assert_eq!(plain.cost, 3.0);
/// assert_eq!(plain.bandwidth, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkAttributes {
    /// Propagation delay, milliseconds. Nonnegative.
    pub latency: f64,
    /// Maximum throughput, arbitrary capacity units. Strictly positive.
    pub bandwidth: f64,
    /// Fraction of packets lost, `[0, 1]`.
    pub packet_loss: f64,
    /// Current load fraction, `[0, 1]`.
    pub utilization: f64,
    /// Monetary or administrative cost per traversal. Nonnegative.
    pub cost: f64,
    /// Baseline link reliability, `[0, 1]`.
    pub reliability: f64,
}

impl LinkAttributes {
    /// Creates a fully specified attribute record.
    ///
    /// Out-of-range inputs are clamped into their invariant ranges;
    /// `bandwidth` is floored at a small positive epsilon so the weight
    /// model never divides by zero.
    pub fn new(
        latency: f64,
        bandwidth: f64,
        packet_loss: f64,
        utilization: f64,
        cost: f64,
        reliability: f64,
    ) -> Self {
        Self {
            latency: latency.max(0.0),
            bandwidth: bandwidth.max(f64::EPSILON),
            packet_loss: packet_loss.clamp(0.0, 1.0),
            utilization: utilization.clamp(0.0, 1.0),
            cost: cost.max(0.0),
            reliability: reliability.clamp(0.0, 1.0),
        }
    }

    /// Creates a record from a single scalar weight.
    ///
    /// Sets `latency = cost = weight`; all other attributes take neutral
    /// defaults (`bandwidth = 1`, no loss, no load, full reliability).
    /// Used when loading plain `node node weight` edge lists.
    pub fn from_weight(weight: f64) -> Self {
        Self {
            latency: weight.max(0.0),
            bandwidth: 1.0,
            packet_loss: 0.0,
            utilization: 0.0,
            cost: weight.max(0.0),
            reliability: 1.0,
        }
    }
}

impl Default for LinkAttributes {
    /// A unit link: `from_weight(1.0)`.
    fn default() -> Self {
        Self::from_weight(1.0)
    }
}
