use chrono::Utc;
use giro_route::domains::containers::{Container, ContainerSnapshot};
use giro_route::domains::priority::*;
use giro_route::DomainError;

fn container(id: &str, fill: i64) -> Container {
    Container::new(id, -33.45, -70.66, fill, Utc::now()).unwrap()
}

#[test]
fn classification_is_total_over_valid_fill_levels() {
    for fill in 0..=100 {
        let class = classify(fill).unwrap();
        let expected = if fill <= 30 {
            UrgencyClass::Low
        } else if fill <= 70 {
            UrgencyClass::Medium
        } else {
            UrgencyClass::Critical
        };
        assert_eq!(class, expected, "fill {}", fill);
        assert_eq!(urgency_of(&container("c", fill)), expected);
    }
    assert_eq!(
        classify(101),
        Err(DomainError::OutOfRangeFillLevel { value: 101 })
    );
}

#[test]
fn custom_weights_only_touch_critical_containers() {
    let weights = PriorityWeights {
        first_hop_critical: 0.5,
        subsequent_hop_critical: 0.25,
    };
    assert_eq!(weights.weight(100, HopContext::FirstHop), 0.5);
    assert_eq!(weights.weight(100, HopContext::SubsequentHop), 0.25);
    assert_eq!(weights.weight(50, HopContext::SubsequentHop), 1.0);
}

#[test]
fn eligibility_presets() {
    let snapshot = ContainerSnapshot::new(vec![
        container("a", 20),
        container("b", 51),
        container("c", 70),
        container("d", 71),
    ])
    .unwrap();

    let collect: Vec<_> = Eligibility::collection()
        .filter(&snapshot.containers)
        .iter()
        .map(|c| c.id().to_string())
        .collect();
    assert_eq!(collect, vec!["b", "c", "d"]);

    let critical = Eligibility::critical_only().filter(&snapshot.containers);
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].id().as_str(), "d");
}

#[test]
fn priority_listing_is_stable_for_equal_scores() {
    let sorted = sort_by_priority(&[container("x", 40), container("y", 40), container("z", 95)]);
    let ids: Vec<_> = sorted.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, vec!["z", "x", "y"]);
    assert_eq!(priority_score(95), 145);
    assert_eq!(priority_score(40), 40);
}

#[test]
fn ultrasonic_readings_map_to_percent() {
    assert_eq!(
        fill_level_from_distance(15.0, DEFAULT_CONTAINER_HEIGHT_CM).unwrap(),
        50
    );
    assert_eq!(
        fill_level_from_distance(30.0, DEFAULT_CONTAINER_HEIGHT_CM).unwrap(),
        0
    );
    assert_eq!(
        fill_level_from_distance(0.0, DEFAULT_CONTAINER_HEIGHT_CM).unwrap(),
        100
    );
    assert!(matches!(
        fill_level_from_distance(f64::NAN, 30.0),
        Err(DomainError::InvalidCommand { .. })
    ));
}

#[test]
fn snapshot_statistics() {
    let snapshot = ContainerSnapshot::new(vec![
        container("a", 5),
        container("b", 45),
        container("c", 85),
        container("d", 99),
    ])
    .unwrap();
    let stats = snapshot.statistics();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.critical, 2);
    assert_eq!(stats.medium, 1);
    assert_eq!(stats.low, 1);
}
