//! Tessellation options, defaulting from the shared `config` crate.

use crate::error::{TessellateError, TessellateResult};
use config::constants::{
    DEFAULT_ANGULAR_TOLERANCE, DEFAULT_COMPUTE_EDGES, DEFAULT_COMPUTE_FACES, DEFAULT_DEBUG_LEVEL,
    DEFAULT_PARALLEL, DEFAULT_TIMEIT,
};
use serde::{Deserialize, Serialize};

/// Options for one tessellation run.
///
/// # Examples
/// ```
/// use brep_mesh::TessellateOptions;
/// let options = TessellateOptions::new(0.01).with_debug(2);
/// assert_eq!(options.angular_tolerance, 0.3);
/// assert!(options.compute_faces && options.compute_edges);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TessellateOptions {
    /// Maximum chordal deviation of the mesh from the surface.
    pub deflection: f64,
    /// Maximum angle (radians) between adjacent mesh elements.
    pub angular_tolerance: f64,
    /// Collect face triangulations.
    pub compute_faces: bool,
    /// Collect edge polylines, or synthesize them when the shape has none.
    pub compute_edges: bool,
    /// Let the kernel mesh and records be collected in parallel.
    pub parallel: bool,
    /// Diagnostic verbosity: 0 silent, 1 info, 2 debug, 3 trace.
    pub debug: u8,
    /// Report stage timings.
    pub timeit: bool,
}

impl TessellateOptions {
    /// Creates options with the given deflection and defaults for the rest.
    pub fn new(deflection: f64) -> Self {
        Self {
            deflection,
            angular_tolerance: DEFAULT_ANGULAR_TOLERANCE,
            compute_faces: DEFAULT_COMPUTE_FACES,
            compute_edges: DEFAULT_COMPUTE_EDGES,
            parallel: DEFAULT_PARALLEL,
            debug: DEFAULT_DEBUG_LEVEL,
            timeit: DEFAULT_TIMEIT,
        }
    }

    pub fn with_angular_tolerance(mut self, angular_tolerance: f64) -> Self {
        self.angular_tolerance = angular_tolerance;
        self
    }

    pub fn with_faces(mut self, compute_faces: bool) -> Self {
        self.compute_faces = compute_faces;
        self
    }

    pub fn with_edges(mut self, compute_edges: bool) -> Self {
        self.compute_edges = compute_edges;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_debug(mut self, debug: u8) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeit(mut self, timeit: bool) -> Self {
        self.timeit = timeit;
        self
    }

    /// Rejects non-positive or non-finite tolerances.
    pub fn validate(&self) -> TessellateResult<()> {
        if !(self.deflection.is_finite() && self.deflection > 0.0) {
            return Err(TessellateError::invalid_options(format!(
                "deflection must be positive and finite, got {}",
                self.deflection
            )));
        }
        if !(self.angular_tolerance.is_finite() && self.angular_tolerance > 0.0) {
            return Err(TessellateError::invalid_options(format!(
                "angular tolerance must be positive and finite, got {}",
                self.angular_tolerance
            )));
        }
        Ok(())
    }

    /// The subset of options the kernel mesher needs.
    pub fn meshing_params(&self) -> MeshingParams {
        MeshingParams {
            deflection: self.deflection,
            angular_tolerance: self.angular_tolerance,
            parallel: self.parallel,
        }
    }
}

/// Parameters forwarded to [`Kernel::mesh`](crate::kernel::Kernel::mesh).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshingParams {
    pub deflection: f64,
    pub angular_tolerance: f64,
    pub parallel: bool,
}
