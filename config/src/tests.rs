//! # Tests for Config Constants
//!
//! Unit tests verifying the consistency of configuration constants.

use crate::constants::*;

// =============================================================================
// SENTINEL TESTS
// =============================================================================

#[test]
fn test_sentinels_are_negative() {
    assert!(MISSING_FACE_TYPE < 0);
    assert!(MISSING_EDGE_TYPE < 0);
    assert!(SYNTHESIZED_EDGE_TYPE < 0);
}

#[test]
fn test_synthesized_edge_type_is_distinct() {
    assert_ne!(
        SYNTHESIZED_EDGE_TYPE, MISSING_EDGE_TYPE,
        "synthesized edges must be distinguishable from missing ones"
    );
}

#[test]
fn test_is_sentinel_type() {
    assert!(is_sentinel_type(MISSING_FACE_TYPE));
    assert!(is_sentinel_type(MISSING_EDGE_TYPE));
    assert!(is_sentinel_type(SYNTHESIZED_EDGE_TYPE));
    // Kernel type codes start at zero (plane / line)
    assert!(!is_sentinel_type(0));
    assert!(!is_sentinel_type(10));
}

// =============================================================================
// DEFAULT TESTS
// =============================================================================

#[test]
fn test_default_angular_tolerance_is_positive() {
    assert!(DEFAULT_ANGULAR_TOLERANCE > 0.0);
}

#[test]
fn test_defaults_compute_everything() {
    assert!(DEFAULT_COMPUTE_FACES);
    assert!(DEFAULT_COMPUTE_EDGES);
    assert!(!DEFAULT_TIMEIT);
    assert_eq!(DEFAULT_DEBUG_LEVEL, 0);
}

#[test]
fn test_debug_levels_are_ordered() {
    assert!(DEFAULT_DEBUG_LEVEL < DEBUG_LEVEL_INFO);
    assert!(DEBUG_LEVEL_INFO < DEBUG_LEVEL_DEBUG);
    assert!(DEBUG_LEVEL_DEBUG < DEBUG_LEVEL_TRACE);
}

// =============================================================================
// STRIDE TESTS
// =============================================================================

#[test]
fn test_segment_stride_is_two_vertices() {
    assert_eq!(COORDS_PER_SEGMENT, 2 * COORDS_PER_VERTEX);
}

#[test]
fn test_synthesized_edge_covers_triangle() {
    assert_eq!(SEGMENTS_PER_SYNTHESIZED_EDGE as usize, INDICES_PER_TRIANGLE);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_max_vertices_fits_index_type() {
    assert_eq!(MAX_VERTICES as u64, u32::MAX as u64);
}

#[test]
fn test_normal_tolerance_is_small() {
    assert!(NORMAL_LENGTH_TOLERANCE > 0.0);
    assert!(NORMAL_LENGTH_TOLERANCE < 1e-2);
}
