use anyhow::{Context, Result};
use geojson::{Feature, GeoJson, Value};
use serde_json::Value as JsonValue;

use geom::LonLat;

/// One line of road geometry, as read from the input file.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadFeature {
    pub name: String,
    /// Free-form classification, like "footway" or "primary"
    pub kind: Option<String>,
    pub oneway: bool,
    /// A destination label to attach to the node where this feature ends
    pub direction: Option<String>,
    pub points: Vec<LonLat>,
}

impl RoadFeature {
    pub fn new(name: &str, oneway: bool, points: Vec<LonLat>) -> RoadFeature {
        RoadFeature {
            name: name.to_string(),
            kind: None,
            oneway,
            direction: None,
            points,
        }
    }
}

pub fn load_features(path: &str) -> Result<Vec<RoadFeature>> {
    let raw = simutil::slurp_file(path)?;
    parse_features(&raw).with_context(|| format!("reading features from {}", path))
}

/// Extracts every line from a GeoJSON feature collection. Features that can't become roads are
/// skipped with a warning, rather than failing the whole file.
pub fn parse_features(raw: &str) -> Result<Vec<RoadFeature>> {
    let geojson = raw.parse::<GeoJson>()?;
    let features = match geojson {
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Geometry(_) => bail!("Expected features, but got a bare geometry"),
    };

    let mut results = Vec::new();
    for (idx, feature) in features.into_iter().enumerate() {
        let lines = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::LineString(line)) => vec![line.clone()],
            Some(Value::MultiLineString(lines)) => lines.clone(),
            Some(other) => {
                warn!("Skipping feature {}: {} isn't a line", idx, geometry_type(other));
                continue;
            }
            None => {
                warn!("Skipping feature {} with no geometry", idx);
                continue;
            }
        };

        for line in lines {
            let mut points = Vec::new();
            for pair in &line {
                if pair.len() < 2 {
                    break;
                }
                points.push(LonLat::new(pair[0], pair[1]));
            }
            if points.len() != line.len() {
                warn!("Skipping feature {} with a malformed coordinate", idx);
                continue;
            }

            results.push(RoadFeature {
                name: string_property(&feature, "name").unwrap_or_default(),
                kind: string_property(&feature, "type"),
                oneway: parse_oneway(feature.property("oneway")),
                direction: string_property(&feature, "direction"),
                points,
            });
        }
    }
    Ok(results)
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::String(x) => Some(x.clone()),
        JsonValue::Number(x) => Some(x.to_string()),
        _ => None,
    }
}

fn geometry_type(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn parse_oneway(value: Option<&JsonValue>) -> bool {
    match value {
        Some(JsonValue::Bool(x)) => *x,
        Some(JsonValue::Number(x)) => x.as_f64().map_or(false, |x| x != 0.0),
        Some(JsonValue::String(x)) => matches!(x.as_str(), "1" | "yes" | "true"),
        _ => false,
    }
}
