//! Single entry point over all solvers.

use tracing::info;

use crate::assignment::{Assignment, AssignmentSolver, CostMatrix};
use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::flow::{self, FlowEdge, FlowSummary, PackItem, Packing};
use crate::models::{Graph, Point, RoutingPlan};
use crate::pathfinding::{self, SearchMode, ShortestPath};
use crate::sequencing::{RouteSequencer, SequencedRoute};
use crate::vrp::VehicleRoutingSolver;

/// Logistics optimizer sharing one configuration across all calls.
///
/// Every call is synchronous and works on its own freshly built state, so a
/// shared `&Optimizer` may be used from several threads at once. To run
/// calls in the background, submit closures over a cloned optimizer to an
/// [`OptimizationPool`](crate::dispatch::OptimizationPool).
///
/// # Examples
///
/// ```
/// use u_logistics::config::OptimizerConfig;
/// use u_logistics::geo::MetricKind;
/// use u_logistics::models::Point;
/// use u_logistics::Optimizer;
///
/// let optimizer = Optimizer::new(OptimizerConfig::new().with_metric(MetricKind::Euclidean));
/// let depot = Point::new(0, 0.0, 0.0);
/// let stops = vec![Point::new(1, 0.0, 1.0), Point::new(2, 1.0, 1.0), Point::new(3, 1.0, 0.0)];
///
/// let route = optimizer.sequence_route(&stops, &depot);
/// assert!((route.total_distance - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed, or validated.
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = OptimizerConfig::load(path)?;
        info!(metric = ?config.metric, strategy = ?config.assignment.strategy, "optimizer configured");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Shortest path between two graph nodes; A* uses the configured metric
    /// as its heuristic.
    pub fn shortest_path(
        &self,
        graph: &Graph,
        start: usize,
        end: usize,
        mode: SearchMode,
    ) -> ShortestPath {
        match mode {
            SearchMode::Dijkstra => pathfinding::dijkstra(graph, start, end),
            SearchMode::AStar => pathfinding::a_star(graph, start, end, &self.config.metric),
        }
    }

    /// Orders the stops of one vehicle starting and ending at `depot`.
    pub fn sequence_route(&self, points: &[Point], depot: &Point) -> SequencedRoute {
        RouteSequencer::new(self.config.sequencing.clone(), self.config.metric)
            .sequence_route(points, depot)
    }

    /// Routes `customers` with vehicles of `capacity` from `depot`.
    pub fn solve_vrp(&self, depot: &Point, customers: &[Point], capacity: i32) -> RoutingPlan {
        VehicleRoutingSolver::new(self.config.vehicle_routing.clone(), self.config.metric)
            .solve(depot, customers, capacity)
    }

    /// Matches left nodes (rows) to right nodes (columns).
    pub fn assign(&self, costs: &CostMatrix) -> Assignment {
        AssignmentSolver::new(self.config.assignment.clone()).assign(costs)
    }

    /// Matches a weight matrix where larger weights are preferred and
    /// non-positive weights mark missing pairs.
    ///
    /// # Errors
    ///
    /// Fails if the rows have different lengths.
    pub fn assign_weights(&self, weights: Vec<Vec<f64>>) -> Result<Assignment> {
        Ok(self.assign(&CostMatrix::from_weights(weights)?))
    }

    /// Maximum flow from `source` to `sink`.
    ///
    /// # Errors
    ///
    /// Fails if an edge has negative capacity.
    pub fn max_flow(&self, edges: &[FlowEdge], source: usize, sink: usize) -> Result<FlowSummary> {
        flow::solve_max_flow(edges, source, sink)
    }

    /// Cheapest flow of `target` units, or of the maximum flow if `None`.
    ///
    /// # Errors
    ///
    /// Fails if an edge has negative capacity.
    pub fn min_cost_max_flow(
        &self,
        edges: &[FlowEdge],
        source: usize,
        sink: usize,
        target: Option<i64>,
    ) -> Result<FlowSummary> {
        flow::solve_min_cost_flow(edges, source, sink, target)
    }

    /// Consolidates items into containers of `capacity`.
    pub fn pack(&self, items: &[PackItem], capacity: i32) -> Packing {
        flow::first_fit_decreasing(items, capacity)
    }
}
