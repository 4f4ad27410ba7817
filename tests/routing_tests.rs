use chrono::Utc;
use giro_route::domains::containers::Container;
use giro_route::domains::geo::{distance_km, GeoPoint};
use giro_route::domains::priority::PriorityWeights;
use giro_route::domains::routing::*;
use giro_route::DomainError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn container(id: &str, lat: f64, lng: f64, fill: i64) -> Container {
    Container::new(id, lat, lng, fill, Utc::now()).unwrap()
}

fn ids(plan: &RoutePlan) -> Vec<String> {
    plan.stops().iter().map(|c| c.id().to_string()).collect()
}

fn random_fleet(seed: u64, n: usize) -> Vec<Container> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            container(
                &format!("C{:03}", i),
                rng.gen_range(-33.50..-33.40),
                rng.gen_range(-70.72..-70.60),
                rng.gen_range(0..=100),
            )
        })
        .collect()
}

#[test]
fn santiago_worked_example() {
    let start = GeoPoint::new(-33.4489, -70.6693).unwrap();
    let a = container("A", -33.45, -70.66, 80);
    let b = container("B", -33.5, -70.70, 60);

    let plan = optimize(&[b.clone(), a.clone()], start).unwrap();
    assert_eq!(ids(&plan), vec!["A", "B"]);

    let expected = distance_km(&start, &a).unwrap() + distance_km(&a, &b).unwrap();
    assert!((plan.total_distance_km() - expected).abs() < 0.01);
    assert_eq!(
        plan.estimated_minutes(),
        estimated_minutes(plan.total_distance_km(), 2)
    );
}

#[test]
fn output_is_a_permutation_and_deterministic() {
    let fleet = random_fleet(42, 40);
    let start = GeoPoint::new(-33.4489, -70.6693).unwrap();

    let first = optimize(&fleet, start).unwrap();
    let second = optimize(&fleet, start).unwrap();
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.total_distance_km(), second.total_distance_km());

    let mut planned = ids(&first);
    let mut input: Vec<String> = fleet.iter().map(|c| c.id().to_string()).collect();
    planned.sort();
    input.sort();
    assert_eq!(planned, input);
}

#[test]
fn critical_container_wins_within_first_hop_discount() {
    let start = GeoPoint::new(0.0, 0.0).unwrap();
    // ~1.00 km away, medium
    let medium = container("M", 0.009, 0.0, 60);
    // ~1.20 km away, critical: 1.20 * 0.8 < 1.00
    let near_critical = container("C", -0.0108, 0.0, 90);
    let plan = optimize(&[medium.clone(), near_critical], start).unwrap();
    assert_eq!(ids(&plan)[0], "C");

    // ~1.30 km away, critical: 1.30 * 0.8 > 1.00
    let far_critical = container("C", -0.0117, 0.0, 90);
    let plan = optimize(&[medium, far_critical], start).unwrap();
    assert_eq!(ids(&plan)[0], "M");
}

#[test]
fn later_hops_use_the_stronger_discount() {
    let start = GeoPoint::new(0.0, 0.0).unwrap();
    let fleet = vec![
        container("F", 0.0, 0.0, 40),
        container("M", 0.009, 0.0, 60),
        // ~1.40 km from F: 1.40 * 0.7 < 1.00, but 1.40 * 0.8 > 1.00
        container("C", -0.0126, 0.0, 90),
    ];

    let plan = optimize(&fleet, start).unwrap();
    assert_eq!(ids(&plan), vec!["F", "C", "M"]);

    let flat = RouteOptimizer::new(
        PriorityWeights {
            first_hop_critical: 0.8,
            subsequent_hop_critical: 0.8,
        },
        MetricsConfig::default(),
    );
    let plan = flat.optimize(&fleet, start).unwrap();
    assert_eq!(ids(&plan), vec!["F", "M", "C"]);
}

#[test]
fn identical_coordinates_keep_input_order() {
    let start = GeoPoint::new(-33.4489, -70.6693).unwrap();
    let fleet = vec![
        container("Z", -33.45, -70.66, 55),
        container("Y", -33.45, -70.66, 55),
        container("X", -33.45, -70.66, 55),
    ];
    let plan = optimize(&fleet, start).unwrap();
    assert_eq!(ids(&plan), vec!["Z", "Y", "X"]);

    let steps = directions(&plan).unwrap();
    assert_eq!(steps[1].heading, None);
    assert_eq!(steps[1].distance_meters, 0.0);
    assert_eq!(steps[1].instruction, "Continue to container Y");
}

#[test]
fn preconditions() {
    let start = GeoPoint::new(0.0, 0.0).unwrap();
    assert_eq!(optimize(&[], start), Err(DomainError::EmptyContainerSet));
    assert_eq!(
        optimize(
            &[container("A", 0.0, 0.0, 10), container("A", 1.0, 1.0, 10)],
            start
        ),
        Err(DomainError::DuplicateContainer { id: "A".to_string() })
    );
    assert_eq!(
        RouteOptimizer::default().optimize_from_first(&[]),
        Err(DomainError::EmptyContainerSet)
    );
}

#[test]
fn single_container_route() {
    let start = GeoPoint::new(-33.4489, -70.6693).unwrap();
    let only = container("solo", -33.45, -70.66, 20);
    let plan = optimize(&[only.clone()], start).unwrap();
    assert_eq!(plan.len(), 1);
    assert!((plan.total_distance_km() - distance_km(&start, &only).unwrap()).abs() < 1e-12);
}

#[test]
fn default_start_at_first_container() {
    let fleet = vec![
        container("A", -33.45, -70.66, 80),
        container("B", -33.46, -70.67, 60),
    ];
    let plan = RouteOptimizer::default().optimize_from_first(&fleet).unwrap();
    assert_eq!(ids(&plan), vec!["A", "B"]);
    let steps = directions(&plan).unwrap();
    assert_eq!(steps[0].instruction, "Head to container A");
}

#[test]
fn directions_and_summary() {
    let start = GeoPoint::new(-33.4489, -70.6693).unwrap();
    let plan = optimize(
        &[
            container("A", -33.45, -70.66, 80),
            container("B", -33.5, -70.70, 60),
        ],
        start,
    )
    .unwrap();

    let steps = directions(&plan).unwrap();
    assert_eq!(steps.len(), 2);
    assert!(steps[0].instruction.starts_with("Head to container A ("));
    assert!(steps[0].instruction.ends_with("from your location)"));
    assert_eq!(steps[0].heading, None);
    assert!(steps[1].instruction.starts_with("Continue southwest to container B"));

    let s = summary(&plan);
    assert_eq!(s.total_stops, 2);
    assert_eq!(s.critical_stops, 1);
    assert_eq!(s.estimated_minutes, plan.estimated_minutes());
}
