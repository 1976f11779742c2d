use super::model::LatLon;

/// Intermediate subdivisions per segment used by the map view
pub const DEFAULT_STEPS: usize = 4;

/// Densify a waypoint path by linear interpolation.
///
/// Each segment contributes its start point plus `steps - 1` evenly spaced
/// intermediate points at ratios `j / steps`; the final waypoint is appended
/// once at the end. Output length is `1 + (len - 1) * steps`.
///
/// Pure and jitter-free: identical input always yields bit-identical output,
/// so route lines never shift between frames.
pub fn smooth_path(path: &[LatLon], steps: usize) -> Vec<LatLon> {
    let Some(&last) = path.last() else {
        return Vec::new();
    };
    let steps = steps.max(1);

    let mut out = Vec::with_capacity(1 + (path.len() - 1) * steps);

    for pair in path.windows(2) {
        let a = pair[0].to_vec();
        let b = pair[1].to_vec();

        out.push(pair[0]);
        for j in 1..steps {
            let ratio = j as f64 / steps as f64;
            out.push(LatLon::from_vec(a + (b - a) * ratio));
        }
    }

    out.push(last);
    out
}
