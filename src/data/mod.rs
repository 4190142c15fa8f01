use std::collections::HashSet;
use std::fs;
use std::path::Path;

use geojson::{GeoJson, Value};

use crate::error::QuizError;
use crate::quiz::region::GeoRing;

/// One validated quiz entity straight out of the dataset: a unique name and
/// one exterior ring per constituent polygon. Interior rings (holes) are
/// dropped; a click inside an enclave resolves to the enclosing region.
#[derive(Clone, Debug)]
pub struct RegionRecord {
    pub name: String,
    pub rings: Vec<GeoRing>,
}

/// Load region records from a GeoJSON file on disk.
pub fn load_regions(path: &Path) -> Result<Vec<RegionRecord>, QuizError> {
    if !path.exists() {
        return Err(QuizError::MissingFile(path.to_path_buf()));
    }
    let mut bytes = fs::read(path)
        .map_err(|e| QuizError::DataFormat(format!("{}: {e}", path.display())))?;
    parse_regions(&mut bytes)
}

/// Parse a GeoJSON FeatureCollection into region records.
///
/// Every feature needs a non-empty, unique `properties.name`. Polygon
/// features contribute their exterior ring; MultiPolygon features one
/// exterior ring per member. Other geometry kinds are skipped with a
/// warning, as are rings too small to enclose anything.
pub fn parse_regions(bytes: &mut [u8]) -> Result<Vec<RegionRecord>, QuizError> {
    let geojson: GeoJson = simd_json::serde::from_slice(bytes)
        .map_err(|e| QuizError::DataFormat(format!("invalid GeoJSON: {e}")))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(QuizError::DataFormat(
            "expected a FeatureCollection at the top level".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(collection.features.len());
    let mut seen: HashSet<String> = HashSet::new();

    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("name"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| QuizError::DataFormat("feature without a name property".to_string()))?
            .to_string();

        if name.is_empty() {
            return Err(QuizError::DataFormat("feature with an empty name".to_string()));
        }
        if !seen.insert(name.clone()) {
            return Err(QuizError::DataFormat(format!("duplicate region name {name:?}")));
        }

        let Some(geometry) = feature.geometry else {
            tracing::warn!(region = %name, "feature without geometry, skipping");
            continue;
        };

        let rings = match geometry.value {
            Value::Polygon(rings) => exterior_ring(&name, &rings).into_iter().collect(),
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|rings| exterior_ring(&name, rings))
                .collect::<Vec<_>>(),
            _ => {
                tracing::warn!(region = %name, "unsupported geometry type, skipping");
                continue;
            }
        };

        if rings.is_empty() {
            tracing::warn!(region = %name, "no usable rings, skipping");
            continue;
        }

        records.push(RegionRecord { name, rings });
    }

    if records.is_empty() {
        return Err(QuizError::DataFormat(
            "dataset contains no usable regions".to_string(),
        ));
    }

    Ok(records)
}

/// Pull the exterior ring out of one polygon's ring list.
fn exterior_ring(name: &str, rings: &[Vec<Vec<f64>>]) -> Option<GeoRing> {
    let exterior = rings.first()?;
    if exterior.len() < 3 {
        tracing::warn!(region = %name, vertices = exterior.len(), "ring too small, skipping");
        return None;
    }
    Some(exterior.iter().map(|c| (c[0], c[1])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<RegionRecord>, QuizError> {
        let mut bytes = json.as_bytes().to_vec();
        parse_regions(&mut bytes)
    }

    const TWO_REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "Square"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "Islands"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[20.0, 0.0], [25.0, 0.0], [25.0, 5.0], [20.0, 5.0], [20.0, 0.0]]],
                        [[[30.0, 10.0], [35.0, 10.0], [35.0, 15.0], [30.0, 15.0], [30.0, 10.0]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_polygon_and_multipolygon() {
        let records = parse(TWO_REGIONS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Square");
        assert_eq!(records[0].rings.len(), 1);
        assert_eq!(records[0].rings[0].len(), 5);
        assert_eq!(records[1].name, "Islands");
        assert_eq!(records[1].rings.len(), 2);
    }

    #[test]
    fn test_holes_are_dropped() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "Donut"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                        [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]]
                    ]
                }
            }]
        }"#;
        let records = parse(json).unwrap();
        assert_eq!(records[0].rings.len(), 1);
    }

    #[test]
    fn test_missing_name_rejected() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}
            }]
        }"#;
        assert!(matches!(parse(json), Err(QuizError::DataFormat(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Twin"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Twin"},
                    "geometry": {"type": "Polygon", "coordinates": [[[2.0,0.0],[3.0,0.0],[3.0,1.0],[2.0,0.0]]]}
                }
            ]
        }"#;
        assert!(matches!(parse(json), Err(QuizError::DataFormat(_))));
    }

    #[test]
    fn test_unsupported_geometry_skipped() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Point"},
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Real"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}
                }
            ]
        }"#;
        let records = parse(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Real");
    }

    #[test]
    fn test_empty_collection_rejected() {
        let json = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(matches!(parse(json), Err(QuizError::DataFormat(_))));
    }

    #[test]
    fn test_not_a_collection_rejected() {
        let json = r#"{"type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}"#;
        assert!(matches!(parse(json), Err(QuizError::DataFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_regions(Path::new("/no/such/dataset.geojson")).unwrap_err();
        assert!(matches!(err, QuizError::MissingFile(_)));
    }
}
