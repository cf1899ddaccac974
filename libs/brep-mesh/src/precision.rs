//! # Precision Conversion
//!
//! Elementwise narrowing of working-precision (`f64`) coordinates to the
//! `f32` buffers renderers consume, and widening back for comparisons.
//!
//! Narrowing is lossy: values are rounded to the nearest `f32`, and values
//! outside the `f32` range become infinite. No guard is applied. Index and
//! count buffers never pass through here.

use config::constants::{COORDS_PER_SEGMENT, COORDS_PER_VERTEX};
use glam::DVec3;

/// Narrows every value to `f32`.
///
/// # Example
///
/// ```rust
/// use brep_mesh::precision::narrow;
///
/// assert_eq!(narrow(&[1.5, -2.0]), vec![1.5f32, -2.0]);
/// ```
pub fn narrow(values: &[f64]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len());
    narrow_into(&mut result, values.iter().copied());
    result
}

/// Appends every value, narrowed to `f32`, to `out`.
///
/// Reserve `out` beforehand to keep this from reallocating.
pub fn narrow_into(out: &mut Vec<f32>, values: impl IntoIterator<Item = f64>) {
    out.extend(values.into_iter().map(|v| v as f32));
}

/// Widens every value to `f64`. Exact.
pub fn widen(values: &[f32]) -> Vec<f64> {
    values.iter().map(|&v| f64::from(v)).collect()
}

/// Coordinates of points as `x, y, z, x, y, z, ...`.
pub(crate) fn point_coords(points: &[DVec3]) -> impl Iterator<Item = f64> + '_ {
    points.iter().flat_map(|p| p.to_array())
}

/// Coordinates of segments as `x0, y0, z0, x1, y1, z1, ...`.
pub(crate) fn segment_coords(segments: &[[DVec3; 2]]) -> impl Iterator<Item = f64> + '_ {
    segments
        .iter()
        .flat_map(|[start, end]| start.to_array().into_iter().chain(end.to_array()))
}

/// Flattens points into `[x, y, z, x, y, z, ...]` at `f32` precision.
pub fn narrow_points(points: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(points.len() * COORDS_PER_VERTEX);
    narrow_into(&mut result, point_coords(points));
    result
}

/// Flattens segments into `[x0, y0, z0, x1, y1, z1, ...]` at `f32` precision.
pub fn narrow_segments(segments: &[[DVec3; 2]]) -> Vec<f32> {
    let mut result = Vec::with_capacity(segments.len() * COORDS_PER_SEGMENT);
    narrow_into(&mut result, segment_coords(segments));
    result
}
