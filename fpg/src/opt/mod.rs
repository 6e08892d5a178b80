/// Audit of layouts described in normalized coordinates
pub mod audit;
pub mod circulation;
/// First-fit placement of a single zone on the occupancy grid
pub mod placement;
/// Orchestration of a complete planning run
pub mod planner;
pub mod sizer;
/// Area budget of a briefing, checked before anything is placed
pub mod validator;

#[doc(inline)]
pub use planner::{LayoutPlanner, Plan};
