//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete process: population
//! initialization via three path-construction heuristics → lazy fitness
//! evaluation → elitism → tournament selection → crossover → mutation →
//! repeat, tracking a global best that never regresses.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use crate::error::GraphError;
use crate::graph::{NetworkGraph, NodeId};
use crate::search::PathResult;
use crate::weight::Strategy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

/// Bounded-BFS limits for path construction and segment rerouting.
const BFS_MAX_PATHS: usize = 5000;
const BFS_MAX_LEN: usize = 20;
const BFS_MAX_FANOUT: usize = 5;
/// Depth cap for the randomized DFS constructor.
const DFS_MAX_DEPTH: usize = 15;
/// Step cap for the greedy constructor.
const GREEDY_MAX_STEPS: usize = 5000;

/// Executes the genetic path optimization.
///
/// The runner owns its pseudo-random generator, seeded from
/// [`GaConfig::seed`]; concurrent instances are fully independent and
/// seeded runs are reproducible.
///
/// # Examples
///
/// ```
/// use netroute::ga::{GaConfig, GaRunner};
/// use netroute::graph::NetworkGraph;
/// use netroute::weight::Strategy;
///
/// let mut g = NetworkGraph::new("g");
/// g.add_edge_weighted(0, 1, 1.0);
/// g.add_edge_weighted(1, 2, 1.0);
/// g.add_edge_weighted(0, 2, 5.0);
///
/// let config = GaConfig::fast().with_seed(42).with_parallel(false);
/// let mut runner = GaRunner::new(config, Strategy::MinimizeLatency);
/// let result = runner.optimize(&g, 0, 2);
/// assert!(result.success);
/// ```
pub struct GaRunner {
    config: GaConfig,
    strategy: Strategy,
    rng: StdRng,
}

impl GaRunner {
    /// Creates a runner.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(config: GaConfig, strategy: Strategy) -> Self {
        config.validate().expect("invalid GaConfig");
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            config,
            strategy,
            rng,
        }
    }

    /// The label used in results and reports.
    pub fn name(&self) -> String {
        format!("Genetic Algorithm ({})", self.strategy.name())
    }

    /// Runs the optimization for a single start/end demand.
    pub fn optimize(&mut self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> PathResult {
        let started = Instant::now();
        let name = self.name();

        if !graph.has_node(start) {
            return PathResult::failed(&name, GraphError::NodeNotFound(start));
        }
        if !graph.has_node(end) {
            return PathResult::failed(&name, GraphError::NodeNotFound(end));
        }
        if start == end {
            return PathResult::found(&name, vec![start], 0.0)
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        let mut population = self.initialize_population(graph, start, end);
        if population.is_empty() {
            return PathResult::failed(&name, GraphError::PathNotFound { start, end })
                .with_time_ms(started.elapsed().as_secs_f64() * 1000.0);
        }

        let mut global_best: Option<Chromosome> = None;

        for generation in 0..self.config.max_generations {
            evaluate_population(
                &mut population,
                graph,
                self.strategy,
                start,
                end,
                self.config.parallel,
            );

            let mut valid_count = 0usize;
            for chromosome in &population {
                if chromosome.fitness.is_finite() {
                    valid_count += 1;
                    let improves = global_best
                        .as_ref()
                        .map_or(true, |best| chromosome.fitness < best.fitness);
                    if improves {
                        global_best = Some(chromosome.clone());
                    }
                }
            }

            // an entirely invalid generation signals infeasibility under
            // the current diversity
            if valid_count == 0 {
                log::debug!("ga {start} -> {end}: all individuals invalid at generation {generation}");
                break;
            }

            population.sort_by(|a, b| {
                a.fitness
                    .partial_cmp(&b.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            if generation % 10 == 0 {
                log::debug!(
                    "ga {start} -> {end}: generation {generation}, best={}, valid={}/{}",
                    population[0].fitness,
                    valid_count,
                    population.len()
                );
            }

            if let Some(threshold) = self.config.early_exit_threshold {
                if generation > self.config.min_generations && population[0].fitness < threshold {
                    break;
                }
            }

            population = self.next_generation(&population, graph, end);
        }

        let elapsed = started.elapsed().as_secs_f64() * 1000.0;
        match global_best {
            Some(best) if best.fitness.is_finite() && best.path.last() == Some(&end) => {
                log::debug!(
                    "ga {start} -> {end}: done, cost={}, {} nodes",
                    best.fitness,
                    best.path.len()
                );
                PathResult::found(&name, best.path, best.fitness).with_time_ms(elapsed)
            }
            _ => PathResult::failed(&name, GraphError::PathNotFound { start, end })
                .with_time_ms(elapsed),
        }
    }

    // -- population construction -------------------------------------------

    /// Generates candidates by alternating three construction heuristics
    /// until the population is full or the attempt budget runs out.
    fn initialize_population(
        &mut self,
        graph: &NetworkGraph,
        start: NodeId,
        end: NodeId,
    ) -> Vec<Chromosome> {
        let target = self.config.population_size;
        let max_attempts = target * 3;
        let mut population = Vec::with_capacity(target);

        for attempt in 0..max_attempts {
            if population.len() >= target {
                break;
            }
            let candidate = match attempt % 3 {
                0 => bfs_path(graph, start, end),
                1 => self.greedy_path(graph, start, end),
                _ => self.dfs_path(graph, start, end),
            };
            if let Some(path) = candidate {
                let chromosome = Chromosome::new(path);
                if chromosome.is_valid(graph, start, end) {
                    population.push(chromosome);
                }
            }
        }

        log::debug!(
            "ga init {start} -> {end}: {}/{} valid candidates",
            population.len(),
            target
        );
        population
    }

    fn next_generation(
        &mut self,
        population: &[Chromosome],
        graph: &NetworkGraph,
        end: NodeId,
    ) -> Vec<Chromosome> {
        let target = self.config.population_size;
        let elite_count =
            ((target as f64 * self.config.elite_ratio) as usize).max(2).min(population.len());

        let mut next: Vec<Chromosome> = population
            .iter()
            .take(elite_count)
            .filter(|c| c.fitness.is_finite())
            .cloned()
            .collect();

        while next.len() < target {
            let p1 = &population[self.tournament(population)];
            let p2 = &population[self.tournament(population)];

            let mut child = if self.rng.random::<f64>() < self.config.crossover_rate
                && p1.fitness.is_finite()
                && p2.fitness.is_finite()
            {
                self.crossover(p1, p2, graph, end)
            } else {
                clone_fitter(p1, p2)
            };
            child.invalidate();

            if self.rng.random::<f64>() < self.config.mutation_rate && child.path.len() >= 2 {
                self.mutate(&mut child, graph);
            }

            next.push(child);
        }

        next.truncate(target);
        next
    }

    /// K-way tournament (two-way by default): best fitness among k random
    /// picks wins.
    fn tournament(&mut self, population: &[Chromosome]) -> usize {
        let n = population.len();
        let mut best = self.rng.random_range(0..n);
        for _ in 1..self.config.tournament_size {
            let idx = self.rng.random_range(0..n);
            if population[idx].fitness < population[best].fitness {
                best = idx;
            }
        }
        best
    }

    // -- operators ----------------------------------------------------------

    /// Single-point crossover: a prefix of `p1` spliced to the suffix of
    /// `p2` after a shared node; when no shared node exists the prefix is
    /// bridged to `end` with a greedy walk; when bridging fails the fitter
    /// parent is cloned.
    fn crossover(
        &mut self,
        p1: &Chromosome,
        p2: &Chromosome,
        graph: &NetworkGraph,
        end: NodeId,
    ) -> Chromosome {
        if p1.path.len() < 3 || p2.path.len() < 3 {
            return clone_fitter(p1, p2);
        }

        let upper = p1.path.len().min(p2.path.len()) - 2;
        let point = self.rng.random_range(1..=upper);
        let mut child: Vec<NodeId> = p1.path[..point].to_vec();
        let junction = *child.last().expect("prefix is non-empty");

        if let Some(pos) = p2.path.iter().position(|&n| n == junction) {
            if pos + 1 < p2.path.len() {
                child.extend_from_slice(&p2.path[pos + 1..]);
                return Chromosome::new(child);
            }
        }

        if let Some(bridge) = self.greedy_path(graph, junction, end) {
            if bridge.len() > 1 {
                child.extend_from_slice(&bridge[1..]);
                return Chromosome::new(child);
            }
        }

        clone_fitter(p1, p2)
    }

    /// Applies one of three mutations: segment reroute (40%), node elision
    /// (30%), or adjacent swap.
    fn mutate(&mut self, chromosome: &mut Chromosome, graph: &NetworkGraph) {
        if chromosome.path.len() < 3 {
            return;
        }

        let roll: f64 = self.rng.random();
        let pos = self.rng.random_range(1..chromosome.path.len() - 1);

        if roll < 0.4 {
            // reroute the edge pos -> pos+1 through a fresh BFS segment
            let from = chromosome.path[pos];
            let to = chromosome.path[pos + 1];
            if let Some(segment) = bfs_path(graph, from, to) {
                if segment.len() > 1 {
                    chromosome.path.splice(pos..pos + 2, segment);
                }
            }
        } else if roll < 0.7 {
            // skip a node when its neighbors are directly connected
            let prev = chromosome.path[pos - 1];
            let next = chromosome.path[pos + 1];
            if graph.has_edge(prev, next) {
                chromosome.path.remove(pos);
            }
        } else {
            chromosome.path.swap(pos, pos + 1);
        }

        chromosome.invalidate();
    }

    // -- path construction heuristics ---------------------------------------

    /// Randomized depth-first walk with shuffled neighbor order.
    fn dfs_path(&mut self, graph: &NetworkGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        if self.dfs_visit(graph, start, end, &mut path, &mut visited) {
            Some(path)
        } else {
            None
        }
    }

    fn dfs_visit(
        &mut self,
        graph: &NetworkGraph,
        current: NodeId,
        end: NodeId,
        path: &mut Vec<NodeId>,
        visited: &mut HashSet<NodeId>,
    ) -> bool {
        if current == end {
            path.push(current);
            return true;
        }
        if visited.contains(&current) || path.len() > DFS_MAX_DEPTH {
            return false;
        }
        visited.insert(current);
        path.push(current);

        let mut neighbors = graph.neighbors(current);
        neighbors.sort_unstable(); // stable base order before the seeded shuffle
        neighbors.shuffle(&mut self.rng);

        for neighbor in neighbors {
            if self.dfs_visit(graph, neighbor, end, path, visited) {
                return true;
            }
        }

        path.pop();
        false
    }

    /// Greedy walk choosing the lowest-incremental-cost unvisited neighbor.
    fn greedy_path(
        &mut self,
        graph: &NetworkGraph,
        start: NodeId,
        end: NodeId,
    ) -> Option<Vec<NodeId>> {
        let mut path = vec![start];
        let mut visited: HashSet<NodeId> = HashSet::from([start]);
        let mut current = start;

        for _ in 0..GREEDY_MAX_STEPS {
            if current == end {
                break;
            }
            let mut neighbors = graph.neighbors(current);
            if neighbors.is_empty() {
                break;
            }
            neighbors.sort_unstable();

            let mut best: Option<(NodeId, f64)> = None;
            for &neighbor in &neighbors {
                if visited.contains(&neighbor) {
                    continue;
                }
                let cost = graph
                    .edge_weight(current, neighbor, self.strategy)
                    .unwrap_or(1.0);
                if best.map_or(true, |(_, b)| cost < b) {
                    best = Some((neighbor, cost));
                }
            }

            let Some((next, _)) = best else {
                break; // every neighbor already visited: dead end
            };
            path.push(next);
            visited.insert(next);
            current = next;
        }

        (current == end).then_some(path)
    }
}

/// Bounded breadth-first path construction: explores at most
/// [`BFS_MAX_PATHS`] partial paths of length <= [`BFS_MAX_LEN`], expanding
/// at most [`BFS_MAX_FANOUT`] neighbors per node.
fn bfs_path(graph: &NetworkGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    if start == end {
        return Some(vec![start]);
    }

    let mut queue: VecDeque<Vec<NodeId>> = VecDeque::new();
    let mut visited: HashSet<NodeId> = HashSet::from([start]);
    queue.push_back(vec![start]);

    let mut explored = 0usize;
    while let Some(path) = queue.pop_front() {
        explored += 1;
        if explored > BFS_MAX_PATHS {
            break;
        }

        let current = *path.last().expect("queued paths are non-empty");
        if current == end {
            return Some(path);
        }

        let mut neighbors = graph.neighbors(current);
        neighbors.sort_unstable(); // reproducible expansion order

        for &neighbor in neighbors.iter().take(BFS_MAX_FANOUT) {
            if visited.insert(neighbor) {
                let mut extended = path.clone();
                extended.push(neighbor);
                if extended.len() <= BFS_MAX_LEN {
                    queue.push_back(extended);
                }
            }
        }
    }

    None
}

fn clone_fitter(p1: &Chromosome, p2: &Chromosome) -> Chromosome {
    if p1.fitness < p2.fitness {
        p1.clone()
    } else {
        p2.clone()
    }
}

/// Evaluates every chromosome whose cached fitness is stale.
fn evaluate_population(
    population: &mut [Chromosome],
    graph: &NetworkGraph,
    strategy: Strategy,
    start: NodeId,
    end: NodeId,
    parallel: bool,
) {
    let evaluate = |chromosome: &mut Chromosome| {
        if !chromosome.evaluated {
            chromosome.fitness = chromosome.evaluate(graph, strategy, start, end);
            chromosome.evaluated = true;
        }
    };
    if parallel {
        population.par_iter_mut().for_each(evaluate);
    } else {
        population.iter_mut().for_each(evaluate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> NetworkGraph {
        let mut g = NetworkGraph::new("triangle");
        g.add_edge_weighted(0, 1, 1.0);
        g.add_edge_weighted(1, 2, 1.0);
        g.add_edge_weighted(0, 2, 5.0);
        g
    }

    fn grid(width: i64, height: i64) -> NetworkGraph {
        let mut g = NetworkGraph::new("grid");
        for y in 0..height {
            for x in 0..width {
                let id = y * width + x;
                if x + 1 < width {
                    g.add_edge_weighted(id, id + 1, 1.0);
                }
                if y + 1 < height {
                    g.add_edge_weighted(id, id + width, 1.0);
                }
            }
        }
        g
    }

    fn runner(seed: u64) -> GaRunner {
        let config = GaConfig::fast().with_seed(seed).with_parallel(false);
        GaRunner::new(config, Strategy::MinimizeLatency)
    }

    #[test]
    fn test_finds_cheap_path_on_triangle() {
        let g = triangle();
        let result = runner(42).optimize(&g, 0, 2);
        assert!(result.success);
        assert_eq!(result.path, vec![0, 1, 2]);
        assert!((result.total_cost - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_result_is_simple_path_with_recomputed_cost() {
        let g = grid(5, 5);
        let result = runner(7).optimize(&g, 0, 24);
        assert!(result.success);

        // simple path: no repeated nodes, valid hops
        let chromosome = Chromosome::new(result.path.clone());
        assert!(chromosome.is_valid(&g, 0, 24));

        // reported objective equals the independently recomputed sum
        let recomputed = chromosome.path_cost(&g, Strategy::MinimizeLatency);
        assert!((result.total_cost - recomputed).abs() < 1e-9);
    }

    #[test]
    fn test_missing_endpoint() {
        let g = triangle();
        let result = runner(1).optimize(&g, 0, 99);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::NodeNotFound(99)));
    }

    #[test]
    fn test_unreachable_target() {
        let mut g = triangle();
        g.add_node(50); // isolated
        let result = runner(1).optimize(&g, 0, 50);
        assert!(!result.success);
        assert_eq!(result.error, Some(GraphError::PathNotFound { start: 0, end: 50 }));
    }

    #[test]
    fn test_start_equals_end() {
        let g = triangle();
        let result = runner(1).optimize(&g, 1, 1);
        assert!(result.success);
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let g = grid(4, 4);
        let a = runner(99).optimize(&g, 0, 15);
        let b = runner(99).optimize(&g, 0, 15);
        assert_eq!(a.path, b.path);
        assert_eq!(a.total_cost, b.total_cost);
    }

    #[test]
    fn test_bfs_path_reaches_goal() {
        let g = grid(3, 3);
        let path = bfs_path(&g, 0, 8).expect("grid is connected");
        assert_eq!(*path.first().unwrap(), 0);
        assert_eq!(*path.last().unwrap(), 8);
    }

    #[test]
    fn test_bfs_path_respects_disconnection() {
        let mut g = NetworkGraph::new("g");
        g.add_node(0);
        g.add_node(1);
        assert!(bfs_path(&g, 0, 1).is_none());
    }

    #[test]
    fn test_greedy_path_prefers_cheap_edges() {
        let g = triangle();
        let mut r = runner(3);
        let path = r.greedy_path(&g, 0, 2).expect("path exists");
        // greedy takes the 1.0 edge to node 1 first
        assert_eq!(path, vec![0, 1, 2]);
    }

    #[test]
    fn test_mutation_invalidates_fitness() {
        let g = grid(3, 3);
        let mut r = runner(5);
        let mut c = Chromosome::new(vec![0, 1, 2, 5, 8]);
        c.fitness = 4.0;
        c.evaluated = true;
        r.mutate(&mut c, &g);
        assert!(!c.evaluated);
    }

    #[test]
    fn test_crossover_splices_at_shared_node() {
        let g = grid(3, 3);
        let mut r = runner(11);
        let mut p1 = Chromosome::new(vec![0, 1, 4, 7, 8]);
        p1.fitness = 4.0;
        p1.evaluated = true;
        let mut p2 = Chromosome::new(vec![0, 3, 4, 5, 8]);
        p2.fitness = 4.0;
        p2.evaluated = true;

        let child = r.crossover(&p1, &p2, &g, 8);
        assert_eq!(*child.path.first().unwrap(), 0);
        assert_eq!(*child.path.last().unwrap(), 8);
    }
}
