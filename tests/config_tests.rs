use giro_route::domains::navigation::WatchOptions;
use giro_route::Config;
use std::time::Duration;
use tempfile::tempdir;

#[tokio::test]
async fn partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("giro.toml");
    tokio::fs::write(
        &path,
        r#"
[navigation]
arrival_threshold_meters = 30.0

[data]
data_dir = "/var/lib/giro"
"#,
    )
    .await
    .unwrap();

    let config = Config::from_file(&path).await.unwrap();
    assert_eq!(config.navigation.arrival_threshold_meters, 30.0);
    assert_eq!(config.navigation.approach_bucket_meters, 25.0);
    assert_eq!(config.data.data_dir.as_deref(), Some("/var/lib/giro"));
    assert_eq!(config.data.snapshot_file, "containers.json");
    assert_eq!(config.navigation_settings().approach_radius_meters(), 90.0);
}

#[tokio::test]
async fn invalid_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    tokio::fs::write(&path, "[routing]\nfirst_hop_critical_weight = 1.5\n")
        .await
        .unwrap();
    assert!(Config::from_file(&path).await.is_err());

    tokio::fs::write(&path, "[location]\nfallback_lat = -95.0\n")
        .await
        .unwrap();
    assert!(Config::from_file(&path).await.is_err());

    assert!(Config::from_file(dir.path().join("missing.toml")).await.is_err());
}

#[test]
fn environment_overrides_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("giro.toml");
    std::fs::write(&path, "[routing]\neligibility_min_fill = 70\n").unwrap();

    std::env::set_var("GIRO__NAVIGATION__APPROACH_MULTIPLIER", "4");
    let config = Config::load_layered(Some(&path));
    std::env::remove_var("GIRO__NAVIGATION__APPROACH_MULTIPLIER");
    let config = config.unwrap();

    assert_eq!(config.routing.eligibility_min_fill, 70);
    assert_eq!(config.navigation.approach_multiplier, 4.0);
    assert_eq!(config.eligibility().min_fill_exclusive, 70);
}

#[test]
fn missing_layered_file_falls_back_to_defaults() {
    let config = Config::load_layered(Some("does-not-exist.toml")).unwrap();
    assert_eq!(config.routing.first_hop_critical_weight, 0.8);
    assert_eq!(config.fallback_location().lat, -33.4489);

    let watch = config.watch_options();
    assert_eq!(watch.timeout, Duration::from_secs(10));
    assert_eq!(watch.maximum_age, WatchOptions::navigation().maximum_age);
}
