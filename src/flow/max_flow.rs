//! FIFO push-relabel maximum flow.

use super::ResidualNetwork;
use std::collections::VecDeque;

/// Computes the maximum flow from `s` to `t` on the residual network,
/// leaving the arc flows set to an optimal assignment.
///
/// FIFO variant: active nodes are discharged in queue order, relabeling to
/// one above the lowest admissible neighbor when the current arc list is
/// exhausted.
pub(crate) fn push_relabel(net: &mut ResidualNetwork, s: usize, t: usize) -> i64 {
    let n = net.node_count();
    let mut height = vec![0usize; n];
    let mut excess = vec![0i64; n];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut queued = vec![false; n];

    height[s] = n;

    // saturate every arc out of the source
    for arc_idx in net.outgoing[s].clone() {
        let capacity = net.arcs[arc_idx].capacity;
        if capacity > 0 {
            let v = net.arcs[arc_idx].to;
            net.arcs[arc_idx].flow += capacity;
            net.arcs[arc_idx ^ 1].flow -= capacity;
            excess[v] += capacity;
            excess[s] -= capacity;
            if v != s && v != t && !queued[v] {
                queue.push_back(v);
                queued[v] = true;
            }
        }
    }

    while let Some(u) = queue.pop_front() {
        queued[u] = false;
        discharge(net, u, s, t, &mut height, &mut excess, &mut queue, &mut queued);
    }

    excess[t]
}

#[allow(clippy::too_many_arguments)]
fn discharge(
    net: &mut ResidualNetwork,
    u: usize,
    s: usize,
    t: usize,
    height: &mut [usize],
    excess: &mut [i64],
    queue: &mut VecDeque<usize>,
    queued: &mut [bool],
) {
    let arc_ids = net.outgoing[u].clone();
    let mut cursor = 0;

    while excess[u] > 0 {
        if cursor == arc_ids.len() {
            // relabel to one above the lowest residual neighbor
            let mut min_height = usize::MAX;
            for &arc_idx in &arc_ids {
                if net.arcs[arc_idx].residual() > 0 {
                    min_height = min_height.min(height[net.arcs[arc_idx].to]);
                }
            }
            if min_height == usize::MAX {
                return; // no residual arcs: excess is stranded
            }
            height[u] = min_height + 1;
            cursor = 0;
            continue;
        }

        let arc_idx = arc_ids[cursor];
        let v = net.arcs[arc_idx].to;
        let residual = net.arcs[arc_idx].residual();

        if residual > 0 && height[u] == height[v] + 1 {
            let delta = residual.min(excess[u]);
            net.arcs[arc_idx].flow += delta;
            net.arcs[arc_idx ^ 1].flow -= delta;
            excess[u] -= delta;
            excess[v] += delta;
            if v != s && v != t && !queued[v] {
                queue.push_back(v);
                queued[v] = true;
            }
        } else {
            cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NetworkGraph;

    fn solve(graph: &NetworkGraph, s: i64, t: i64) -> i64 {
        let mut net = ResidualNetwork::build(graph);
        let s = net.index_of[&s];
        let t = net.index_of[&t];
        push_relabel(&mut net, s, t)
    }

    #[test]
    fn test_single_edge() {
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 7.0);
        assert_eq!(solve(&g, 0, 1), 7);
    }

    #[test]
    fn test_chain_bottleneck() {
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 10.0);
        g.add_edge_weighted(1, 2, 3.0);
        g.add_edge_weighted(2, 3, 10.0);
        assert_eq!(solve(&g, 0, 3), 3);
    }

    #[test]
    fn test_parallel_routes_sum() {
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 4.0);
        g.add_edge_weighted(1, 3, 4.0);
        g.add_edge_weighted(0, 2, 6.0);
        g.add_edge_weighted(2, 3, 5.0);
        assert_eq!(solve(&g, 0, 3), 9);
    }

    #[test]
    fn test_no_route() {
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 4.0);
        g.add_node(2);
        assert_eq!(solve(&g, 0, 2), 0);
    }

    #[test]
    fn test_backward_edge_rerouting() {
        // classic case where a naive greedy assignment must push flow back
        let mut g = NetworkGraph::new("g");
        g.add_edge_weighted(0, 1, 1.0);
        g.add_edge_weighted(0, 2, 1.0);
        g.add_edge_weighted(1, 2, 1.0);
        g.add_edge_weighted(1, 3, 1.0);
        g.add_edge_weighted(2, 3, 1.0);
        assert_eq!(solve(&g, 0, 3), 2);
    }
}
