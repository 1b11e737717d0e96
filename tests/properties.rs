use proptest::prelude::*;

use u_logistics::assignment::{AugmentingPathMatcher, CostMatrix, KuhnMunkres, MatchingAlgorithm};
use u_logistics::config::VehicleRoutingConfig;
use u_logistics::distance::DistanceMatrix;
use u_logistics::flow::{max_flow, min_cost_flow, FlowEdge, FlowNetwork};
use u_logistics::geo::{haversine, Euclidean, Haversine, MetricKind};
use u_logistics::models::{Graph, Point};
use u_logistics::pathfinding::{a_star, dijkstra};
use u_logistics::sequencing::{nearest_neighbor_tour, two_opt_improve};
use u_logistics::vrp::VehicleRoutingSolver;

prop_compose! {
    fn coordinate()(lat in -85.0f64..85.0, lon in -179.0f64..179.0) -> (f64, f64) {
        (lat, lon)
    }
}

prop_compose! {
    fn planar_points(min: usize, max: usize)
    (coords in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), min..max)) -> Vec<Point> {
        coords
            .into_iter()
            .enumerate()
            .map(|(id, (lat, lon))| Point::new(id, lat, lon))
            .collect()
    }
}

prop_compose! {
    fn flow_edges(max_nodes: usize)
    (nodes in 2..max_nodes)
    (edges in prop::collection::vec((0..nodes, 0..nodes, 0i64..20, 0.0f64..10.0), 0..30), nodes in Just(nodes))
    -> (usize, Vec<FlowEdge>) {
        let edges = edges
            .into_iter()
            .filter(|(from, to, _, _)| from != to)
            .map(|(from, to, capacity, cost)| FlowEdge::new(from, to, capacity).with_cost(cost))
            .collect();
        (nodes, edges)
    }
}

fn cost_rows(max: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..max, 1..max).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(0.0f64..100.0, cols), rows)
    })
}

/// Net flow into each node (inflow minus outflow).
fn net_inflow(nodes: usize, edges: &[FlowEdge], flows: &[i64]) -> Vec<i64> {
    let mut balance = vec![0i64; nodes];
    for (edge, &flow) in edges.iter().zip(flows) {
        balance[edge.from] -= flow;
        balance[edge.to] += flow;
    }
    balance
}

proptest! {
    #[test]
    fn haversine_symmetric_and_zero_on_identity(a in coordinate(), b in coordinate()) {
        let ab = haversine(a.0, a.1, b.0, b.1);
        let ba = haversine(b.0, b.1, a.0, a.1);
        prop_assert!((ab - ba).abs() <= 1e-6);
        prop_assert!(ab >= 0.0);
        prop_assert_eq!(haversine(a.0, a.1, a.0, a.1), 0.0);
    }

    #[test]
    fn haversine_triangle_inequality(a in coordinate(), b in coordinate(), c in coordinate()) {
        let ac = haversine(a.0, a.1, c.0, c.1);
        let ab = haversine(a.0, a.1, b.0, b.1);
        let bc = haversine(b.0, b.1, c.0, c.1);
        // asin loses precision close to antipodal pairs.
        prop_assert!(ac <= ab + bc + 1.0);
    }

    #[test]
    fn two_opt_never_lengthens_a_tour(
        (points, start) in (3usize..12).prop_flat_map(|n| {
            (planar_points(n, n + 1), Just((1..n).collect::<Vec<usize>>()).prop_shuffle())
        })
    ) {
        let dm = DistanceMatrix::from_points(&points, &Euclidean);
        let before = dm.tour_length(&start, 0);
        let out = two_opt_improve(&start, 0, &dm, 1000, 1e-9);
        prop_assert!(out.length <= before + 1e-9);

        let mut visited = out.tour.clone();
        visited.sort_unstable();
        prop_assert_eq!(visited, (1..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn two_opt_no_worse_than_nearest_neighbor(points in planar_points(2, 15)) {
        let dm = DistanceMatrix::from_points(&points, &Euclidean);
        let nn = nearest_neighbor_tour(&points, &dm);
        let nn_length = dm.tour_length(&nn, 0);
        let out = two_opt_improve(&nn, 0, &dm, 1000, 1e-9);
        prop_assert!(out.length <= nn_length + 1e-9);
    }

    #[test]
    fn vrp_routes_respect_capacity(
        points in planar_points(2, 20),
        demands in prop::collection::vec(1i32..20, 20),
        capacity in 20i32..50,
    ) {
        let depot = points[0].clone();
        let customers: Vec<Point> = points[1..]
            .iter()
            .zip(&demands)
            .map(|(p, &d)| p.clone().with_demand(d))
            .collect();
        let config = VehicleRoutingConfig { average_speed_mps: 1.0, max_route_duration: None };
        let plan = VehicleRoutingSolver::new(config, MetricKind::Euclidean)
            .solve(&depot, &customers, capacity);

        for route in plan.routes() {
            let load: i32 = route
                .point_ids()
                .iter()
                .map(|id| customers.iter().find(|c| c.id() == *id).map_or(0, |c| c.demand()))
                .sum();
            prop_assert!(load <= capacity);
            prop_assert_eq!(load, route.total_load());
        }

        let mut seen: Vec<usize> = plan.routes().iter().flat_map(|r| r.point_ids()).collect();
        seen.extend_from_slice(plan.unassigned());
        seen.sort_unstable();
        let mut expected: Vec<usize> = customers.iter().map(|c| c.id()).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn max_flow_conserves_and_is_bounded((nodes, edges) in flow_edges(8)) {
        let source = 0;
        let sink = nodes - 1;
        let mut net = FlowNetwork::from_edges(&edges).unwrap();
        let value = max_flow(&mut net, source, sink);
        let flows = net.edge_flows();

        let out_of_source: i64 = edges.iter().filter(|e| e.from == source).map(|e| e.capacity).sum();
        prop_assert!(value <= out_of_source);

        for (edge, &flow) in edges.iter().zip(&flows) {
            prop_assert!(flow >= 0 && flow <= edge.capacity);
        }

        let balance = net_inflow(net.num_nodes(), &edges, &flows);
        for (node, &b) in balance.iter().enumerate() {
            if node != source && node != sink {
                prop_assert_eq!(b, 0);
            }
        }
        if sink < balance.len() {
            prop_assert_eq!(balance[sink], value);
        }
    }

    #[test]
    fn min_cost_flow_reaches_max_flow_value((nodes, edges) in flow_edges(8)) {
        let source = 0;
        let sink = nodes - 1;
        let mut net = FlowNetwork::from_edges(&edges).unwrap();
        let result = min_cost_flow(&mut net, source, sink, None);
        let flows = net.edge_flows();

        let mut reference = FlowNetwork::from_edges(&edges).unwrap();
        prop_assert_eq!(result.flow, max_flow(&mut reference, source, sink));

        let cost: f64 = edges.iter().zip(&flows).map(|(e, &f)| e.cost * f as f64).sum();
        prop_assert!((cost - result.cost).abs() <= 1e-6 * (1.0 + cost.abs()));

        let balance = net_inflow(net.num_nodes(), &edges, &flows);
        for (node, &b) in balance.iter().enumerate() {
            if node != source && node != sink {
                prop_assert_eq!(b, 0);
            }
        }
    }

    #[test]
    fn matchings_are_injective(rows in cost_rows(8)) {
        let costs = CostMatrix::from_rows(rows).unwrap();
        let expected = costs.rows().min(costs.cols());
        for algorithm in [&KuhnMunkres as &dyn MatchingAlgorithm, &AugmentingPathMatcher] {
            let a = algorithm.assign(&costs);
            prop_assert!(a.is_injective());
            prop_assert_eq!(a.num_matched(), expected);
            prop_assert_eq!(a.right_to_left().len(), costs.cols());
        }
    }

    #[test]
    fn kuhn_munkres_never_worse_than_augmenting(rows in cost_rows(8)) {
        let costs = CostMatrix::from_rows(rows).unwrap();
        let optimal = KuhnMunkres.assign(&costs);
        let heuristic = AugmentingPathMatcher.assign(&costs);
        prop_assert!(optimal.total_cost() <= heuristic.total_cost() + 1e-9);
    }

    #[test]
    fn astar_matches_dijkstra(
        coords in prop::collection::vec((0.0f64..0.5, 0.0f64..0.5), 2..12),
        links in prop::collection::vec((0usize..12, 0usize..12, 1.0f64..2.0), 0..40),
    ) {
        let mut graph = Graph::new();
        for (id, &(lat, lon)) in coords.iter().enumerate() {
            graph.add_node(Point::new(id, lat, lon));
        }
        let n = coords.len();
        for (a, b, stretch) in links {
            let (a, b) = (a % n, b % n);
            if a != b {
                // Road length never below the great-circle distance.
                let (pa, pb) = (coords[a], coords[b]);
                let weight = haversine(pa.0, pa.1, pb.0, pb.1) * stretch;
                graph.add_undirected_edge(a, b, weight).unwrap();
            }
        }

        let d = dijkstra(&graph, 0, n - 1);
        let a = a_star(&graph, 0, n - 1, &Haversine);
        prop_assert_eq!(d.is_reachable(), a.is_reachable());
        if d.is_reachable() {
            prop_assert!((d.distance - a.distance).abs() <= 1e-6 * (1.0 + d.distance));
        }
    }
}
