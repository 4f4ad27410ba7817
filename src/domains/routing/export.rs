use super::plan::RoutePlan;
use crate::domains::geo::Coordinate;
use crate::domains::priority::urgency_of;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

/// Renders a plan as GeoJSON: one LineString for the whole run, then one
/// Point per stop carrying its order, id, fill level and urgency.
pub fn to_feature_collection(plan: &RoutePlan) -> FeatureCollection {
    let start = plan.start();
    let mut line = Vec::with_capacity(plan.len() + 1);
    line.push(vec![start.lng, start.lat]);
    line.extend(plan.stops().iter().map(|c| vec![c.lng(), c.lat()]));

    let mut route_props = JsonObject::new();
    route_props.insert("plan_id".to_string(), json!(plan.id()));
    route_props.insert("total_distance_km".to_string(), json!(plan.total_distance_km()));
    route_props.insert("estimated_minutes".to_string(), json!(plan.estimated_minutes()));

    let mut features = vec![Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: Some(route_props),
        foreign_members: None,
    }];

    for (index, container) in plan.stops().iter().enumerate() {
        let mut props = JsonObject::new();
        props.insert("order".to_string(), json!(index + 1));
        props.insert("id".to_string(), json!(container.id().as_str()));
        props.insert("fill_level".to_string(), json!(container.fill_level()));
        props.insert("urgency".to_string(), json!(urgency_of(container).to_string()));

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![container.lng(), container.lat()]))),
            id: None,
            properties: Some(props),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::containers::Container;
    use crate::domains::geo::GeoPoint;
    use crate::domains::routing::optimize;
    use chrono::Utc;

    #[test]
    fn line_starts_at_start_location() {
        let start = GeoPoint::new(-33.4489, -70.6693).unwrap();
        let plan = optimize(
            &[
                Container::new("A", -33.45, -70.66, 90, Utc::now()).unwrap(),
                Container::new("B", -33.5, -70.70, 40, Utc::now()).unwrap(),
            ],
            start,
        )
        .unwrap();

        let fc = to_feature_collection(&plan);
        assert_eq!(fc.features.len(), 3);
        match &fc.features[0].geometry.as_ref().unwrap().value {
            Value::LineString(coords) => {
                assert_eq!(coords.len(), 3);
                assert_eq!(coords[0], vec![-70.6693, -33.4489]);
            }
            other => panic!("expected LineString, got {:?}", other),
        }
        let text = serde_json::to_string(&fc).unwrap();
        assert!(text.contains("\"urgency\":\"CRITICAL\""));
    }
}
