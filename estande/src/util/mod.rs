/// Set of functions used throughout to assure the correctness of layouts.
pub mod assertions;

mod fpa;
mod precision;

#[doc(inline)]
pub use fpa::FPA;
#[doc(inline)]
pub use precision::{round_to, round2};
#[doc(inline)]
pub use precision::PRECISION_DECIMALS;
