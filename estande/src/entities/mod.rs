mod catalog;
mod circulation;
mod layout;
mod report;
mod stand;
mod zone;

#[doc(inline)]
pub use catalog::{Footprint, ZoneCatalog, ZoneNamer, ZoneSpec};
#[doc(inline)]
pub use circulation::{CORRIDOR_COLOR, CirculationArea, CorridorKind};
#[doc(inline)]
pub use layout::{ENTRANCE_WIDTH, Entrance, Layout, Wall, WallSide};
#[doc(inline)]
pub use report::{AreaSource, ValidationReport, ZoneBreakdown};
#[doc(inline)]
pub use stand::*;
#[doc(inline)]
pub use zone::{DroppedZone, PlacedZone, Priority, ZoneKind, ZoneRequest};
