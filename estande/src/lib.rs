//! Deterministic building blocks for exhibition stand floor plans:
//! stand geometry, zone entities, external representations and SVG rendering.

/// Entities to model a stand, its requested zones and the resulting layout
pub mod entities;

/// Geometric primitives and the occupancy grid used during placement
pub mod geometry;

/// Importing briefings into and exporting layouts out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
