use std::path::PathBuf;

use geom::{GPSBounds, LonLat, Pt2D};
use road_network::{load_features, NetworkConfig, RoadNetwork};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("road_network_{}", name));
    fs_err::write(&path, contents).unwrap();
    path
}

#[test]
fn load_network_and_config_from_disk() {
    simutil::logger::setup();
    let config_path = write_temp(
        "load_test_config.json",
        r#"{
            "window_width": 1000.0,
            "window_height": 1000.0,
            "gps_bounds": {"min_lon": 0.0, "min_lat": 0.0, "max_lon": 10.0, "max_lat": 10.0},
            "rng_seed": 7
        }"#,
    );
    let roads_path = write_temp(
        "load_test_roads.geojson",
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "High Street", "oneway": 0, "direction": "market"},
                    "geometry": {"type": "LineString", "coordinates": [[1.0, 5.0], [5.0, 5.0], [9.0, 5.0]]}
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Mill Lane", "oneway": "yes"},
                    "geometry": {"type": "LineString", "coordinates": [[5.0, 1.0], [5.0, 5.0]]}
                }
            ]
        }"#,
    );
    let config_path = config_path.to_str().unwrap();
    let roads_path = roads_path.to_str().unwrap();

    let config = NetworkConfig::load(config_path).unwrap();
    assert_eq!(config.rng_seed, 7);
    let bounds = GPSBounds::from(&[LonLat::new(0.0, 0.0), LonLat::new(10.0, 10.0)]);
    assert_eq!(
        config,
        NetworkConfig {
            rng_seed: 7,
            ..NetworkConfig::new(1000.0, 1000.0, bounds)
        }
    );

    let features = load_features(roads_path).unwrap();
    assert_eq!(features.len(), 2);
    assert!(features[1].oneway);

    let net = RoadNetwork::load(&config, roads_path).unwrap();
    // High Street is split where Mill Lane joins it
    let junction = net.node_at(Pt2D::new(500.0, 500.0)).unwrap();
    assert_eq!(net.get_n(junction).outbound_lanes().len(), 2);
    assert_eq!(net.num_lanes(), 5);
    assert_eq!(net.find_direction("market"), net.node_at(Pt2D::new(900.0, 500.0)));

    fs_err::remove_file(config_path).unwrap();
    fs_err::remove_file(roads_path).unwrap();
}

#[test]
fn missing_files_are_errors() {
    assert!(NetworkConfig::load("no/such/config.json").is_err());
    assert!(load_features("no/such/roads.geojson").is_err());
    let bounds = GPSBounds::from(&[LonLat::new(0.0, 0.0), LonLat::new(10.0, 10.0)]);
    let config = NetworkConfig::new(100.0, 100.0, bounds);
    assert!(RoadNetwork::load(&config, "no/such/roads.geojson").is_err());
}
