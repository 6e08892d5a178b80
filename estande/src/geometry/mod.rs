/// Set of traits representing various geometric properties & operations
pub mod geo_traits;

/// Set of geometric primitives - atomic building blocks for the geometry module
pub mod primitives;

mod grid;

#[doc(inline)]
pub use grid::OccupancyGrid;

#[doc(inline)]
pub use grid::CellRange;
