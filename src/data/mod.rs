use crate::map::{LineString, Lod, MapRenderer};
use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Natural Earth coastline files and the LOD each one feeds
const COASTLINE_FILES: [(&str, Lod); 4] = [
    ("ne_110m_coastline.json", Lod::Low),
    ("natural-earth.json", Lod::Medium),
    ("ne_50m_coastline.json", Lod::Medium),
    ("ne_10m_coastline.json", Lod::High),
];

/// Load all available Natural Earth coastline GeoJSON into the renderer.
/// Missing files are skipped; unreadable ones are logged and skipped.
pub fn load_all_geojson(renderer: &mut MapRenderer, data_dir: &Path) -> Result<()> {
    for (filename, lod) in COASTLINE_FILES {
        let path = data_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match load_coastlines(&path) {
            Ok(lines) => {
                info!(file = filename, lines = lines.len(), ?lod, "loaded coastlines");
                for line in lines {
                    renderer.add_coastline(line, lod);
                }
            }
            Err(e) => warn!(file = filename, error = %e, "failed to load coastlines"),
        }
    }

    Ok(())
}

/// Parse a coastline GeoJSON file into linestrings
fn load_coastlines(path: &Path) -> Result<Vec<LineString>> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(geojson_lines(&geojson))
}

/// Extract every line-like geometry; features are converted in parallel
fn geojson_lines(geojson: &GeoJson) -> Vec<LineString> {
    match geojson {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .par_iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map_iter(geometry_lines)
            .collect(),
        GeoJson::Feature(f) => f.geometry.as_ref().map(geometry_lines).unwrap_or_default(),
        GeoJson::Geometry(geometry) => geometry_lines(geometry),
    }
}

fn ring_to_line(coords: &[Vec<f64>]) -> LineString {
    coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
}

fn geometry_lines(geometry: &Geometry) -> Vec<LineString> {
    match &geometry.value {
        Value::LineString(coords) => vec![ring_to_line(coords)],
        Value::MultiLineString(lines) => lines.iter().map(|c| ring_to_line(c)).collect(),
        Value::Polygon(rings) => rings.first().map(|r| ring_to_line(r)).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first())
            .map(|r| ring_to_line(r))
            .collect(),
        Value::GeometryCollection(geometries) => geometries.iter().flat_map(geometry_lines).collect(),
        _ => Vec::new(),
    }
}

/// Generate a simple world map outline for when no data file is available
pub fn generate_simple_world(renderer: &mut MapRenderer) {
    // Simplified continent outlines (used as Low LOD fallback)
    renderer.add_coastline(
        vec![
            (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
            (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
            (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
            (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
            (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
            (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
            (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
            (-168.0, 65.0),
        ],
        Lod::Low,
    );

    renderer.add_coastline(
        vec![
            (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
            (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
            (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
            (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
            (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
            (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
        ],
        Lod::Low,
    );

    renderer.add_coastline(
        vec![
            (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
            (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
            (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
            (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
            (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
            (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
        ],
        Lod::Low,
    );

    renderer.add_coastline(
        vec![
            (-17.0, 15.0), (-15.0, 10.0), (-10.0, 5.0), (0.0, 5.0),
            (10.0, 5.0), (15.0, 0.0), (20.0, -5.0), (25.0, -10.0),
            (35.0, -20.0), (35.0, -25.0), (30.0, -30.0), (20.0, -35.0),
            (18.0, -35.0), (15.0, -30.0), (10.0, -15.0), (10.0, 0.0),
            (5.0, 5.0), (-5.0, 5.0), (-10.0, 10.0), (-17.0, 15.0),
        ],
        Lod::Low,
    );

    renderer.add_coastline(
        vec![
            (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
            (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
            (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
            (35.0, -5.0), (35.0, -20.0),
        ],
        Lod::Low,
    );

    renderer.add_coastline(
        vec![
            (35.0, 42.0), (40.0, 43.0), (50.0, 40.0), (55.0, 37.0),
            (60.0, 25.0), (65.0, 25.0), (70.0, 20.0), (75.0, 15.0),
            (80.0, 8.0), (80.0, 15.0), (88.0, 22.0), (92.0, 22.0),
            (95.0, 16.0), (100.0, 14.0), (105.0, 10.0), (110.0, 20.0),
            (115.0, 22.0), (120.0, 22.0), (122.0, 25.0), (125.0, 30.0),
            (130.0, 35.0), (135.0, 35.0), (140.0, 40.0), (145.0, 45.0),
            (145.0, 50.0), (140.0, 55.0), (135.0, 55.0), (130.0, 52.0),
            (130.0, 43.0), (120.0, 40.0), (110.0, 45.0), (90.0, 50.0),
            (70.0, 55.0), (60.0, 55.0), (50.0, 50.0), (40.0, 43.0),
        ],
        Lod::Low,
    );

    renderer.add_coastline(
        vec![
            (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
            (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
            (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
            (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
        ],
        Lod::Low,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_world() {
        let mut renderer = MapRenderer::new();
        generate_simple_world(&mut renderer);
        assert!(renderer.has_data());
        assert!(renderer.coastlines_low.iter().all(|l| l.len() >= 2));
    }

    #[test]
    fn test_geojson_lines() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry":
                    {"type": "LineString", "coordinates": [[0.0, 1.0], [2.0, 3.0]]}},
                {"type": "Feature", "properties": {}, "geometry":
                    {"type": "MultiPolygon", "coordinates": [[[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]]}},
                {"type": "Feature", "properties": {}, "geometry":
                    {"type": "Point", "coordinates": [9.0, 9.0]}}
            ]
        }"#;
        let mut bytes = text.as_bytes().to_vec();
        let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes).expect("valid geojson");
        let lines = geojson_lines(&geojson);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(lines[1].len(), 4);
    }

    #[test]
    fn test_missing_dir_is_ok() {
        let mut renderer = MapRenderer::new();
        load_all_geojson(&mut renderer, Path::new("/nonexistent/risk-map-data")).expect("skips");
        assert!(!renderer.has_data());
    }
}
