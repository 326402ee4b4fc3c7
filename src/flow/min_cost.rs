//! Minimum-cost maximum flow via successive shortest augmenting paths.

use super::ResidualNetwork;
use crate::search::FrontierEntry;
use std::collections::BinaryHeap;

/// Computes a maximum flow of minimum total cost from `s` to `t`.
///
/// Repeatedly augments along a cheapest residual path found by Dijkstra
/// over reduced costs. Johnson potentials keep reduced costs nonnegative;
/// the original arc costs are nonnegative (latencies), so the initial zero
/// potentials are valid without a Bellman-Ford pass.
pub(crate) fn min_cost_max_flow(net: &mut ResidualNetwork, s: usize, t: usize) -> (i64, f64) {
    let n = net.node_count();
    let mut potential = vec![0.0f64; n];
    let mut total_flow = 0i64;
    let mut total_cost = 0.0f64;

    loop {
        let Some((dist, pred_arc)) = cheapest_paths(net, s, &potential) else {
            break;
        };
        if dist[t].is_infinite() {
            break;
        }

        for v in 0..n {
            if dist[v].is_finite() {
                potential[v] += dist[v];
            }
        }

        // bottleneck along the augmenting path
        let mut bottleneck = i64::MAX;
        let mut v = t;
        while v != s {
            let arc_idx = pred_arc[v];
            bottleneck = bottleneck.min(net.arcs[arc_idx].residual());
            v = net.arc_source(arc_idx);
        }
        if bottleneck <= 0 || bottleneck == i64::MAX {
            break;
        }

        let mut v = t;
        while v != s {
            let arc_idx = pred_arc[v];
            net.arcs[arc_idx].flow += bottleneck;
            net.arcs[arc_idx ^ 1].flow -= bottleneck;
            total_cost += net.arcs[arc_idx].cost * bottleneck as f64;
            v = net.arc_source(arc_idx);
        }
        total_flow += bottleneck;
    }

    (total_flow, total_cost)
}

/// Dijkstra over reduced costs on the residual network.
///
/// Returns distances and the predecessor arc per node, or `None` when the
/// source has no residual arcs at all.
fn cheapest_paths(
    net: &ResidualNetwork,
    s: usize,
    potential: &[f64],
) -> Option<(Vec<f64>, Vec<usize>)> {
    let n = net.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred_arc = vec![usize::MAX; n];
    let mut settled = vec![false; n];
    let mut frontier = BinaryHeap::new();

    dist[s] = 0.0;
    frontier.push(FrontierEntry {
        priority: 0.0,
        node: s,
    });

    let mut reached_any = false;
    while let Some(FrontierEntry { node: u, .. }) = frontier.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;
        reached_any = true;

        for &arc_idx in &net.outgoing[u] {
            let arc = &net.arcs[arc_idx];
            if arc.residual() <= 0 {
                continue;
            }
            let v = arc.to;
            // floating-point noise can push a reduced cost slightly negative
            let reduced = (arc.cost + potential[u] - potential[v]).max(0.0);
            let candidate = dist[u] + reduced;
            if candidate < dist[v] {
                dist[v] = candidate;
                pred_arc[v] = arc_idx;
                frontier.push(FrontierEntry {
                    priority: candidate,
                    node: v,
                });
            }
        }
    }

    reached_any.then_some((dist, pred_arc))
}
