use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::StandSpec;
use crate::geometry::primitives::Rect;
use crate::io::svg::Color;

/// Functional purpose of a zone inside the stand.
/// Parses from English names and from the Portuguese briefing vocabulary,
/// anything else is kept verbatim as [`ZoneKind::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneKind {
    Reception,
    Exhibition,
    Meeting,
    Pantry,
    Storage,
    Office,
    Demo,
    Counter,
    Other(String),
}

impl ZoneKind {
    /// All kinds known to the default catalog
    pub const KNOWN: [ZoneKind; 8] = [
        ZoneKind::Reception,
        ZoneKind::Exhibition,
        ZoneKind::Meeting,
        ZoneKind::Pantry,
        ZoneKind::Storage,
        ZoneKind::Office,
        ZoneKind::Demo,
        ZoneKind::Counter,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ZoneKind::Reception => "reception",
            ZoneKind::Exhibition => "exhibition",
            ZoneKind::Meeting => "meeting",
            ZoneKind::Pantry => "pantry",
            ZoneKind::Storage => "storage",
            ZoneKind::Office => "office",
            ZoneKind::Demo => "demo",
            ZoneKind::Counter => "counter",
            ZoneKind::Other(name) => name,
        }
    }

    /// Zones that face the visitors by default
    pub fn faces_entrance(&self) -> bool {
        matches!(
            self,
            ZoneKind::Exhibition | ZoneKind::Reception | ZoneKind::Counter
        )
    }

    /// Zones kept away from the entrance
    pub fn is_private(&self) -> bool {
        matches!(self, ZoneKind::Meeting | ZoneKind::Office)
    }

    /// Low visibility zones, any corner will do
    pub fn is_service(&self) -> bool {
        matches!(self, ZoneKind::Pantry | ZoneKind::Storage)
    }
}

impl FromStr for ZoneKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        let kind = match normalized.as_str() {
            "reception" | "recepcao" | "recepção" => ZoneKind::Reception,
            "exhibition" | "exposicao" | "exposição" | "area_exposicao" | "área_exposição" => {
                ZoneKind::Exhibition
            }
            "meeting" | "reuniao" | "reunião" | "sala_reuniao" | "sala_reunião" => {
                ZoneKind::Meeting
            }
            "pantry" | "copa" => ZoneKind::Pantry,
            "storage" | "deposito" | "depósito" => ZoneKind::Storage,
            "office" | "escritorio" | "escritório" => ZoneKind::Office,
            "demo" | "demonstracao" | "demonstração" => ZoneKind::Demo,
            "counter" | "balcao" | "balcão" => ZoneKind::Counter,
            _ => ZoneKind::Other(s.trim().to_string()),
        };
        Ok(kind)
    }
}

impl From<String> for ZoneKind {
    fn from(s: String) -> Self {
        match ZoneKind::from_str(&s) {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ZoneKind> for String {
    fn from(kind: ZoneKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Display for ZoneKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Importance tier of a zone. Ordered from most to least important.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[serde(alias = "alta")]
    High,
    #[default]
    #[serde(alias = "media", alias = "média")]
    Medium,
    #[serde(alias = "baixa")]
    Low,
}

impl Priority {
    /// Failing to place a mandatory zone aborts the whole run
    pub fn is_mandatory(&self) -> bool {
        *self == Priority::High
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A functional zone the client asked for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneRequest {
    pub kind: ZoneKind,
    /// Explicit area (m²), absent when the catalog should decide
    pub requested_area: Option<f64>,
    pub priority: Priority,
    /// Prefer positions along the front edge, next to the entrance
    pub adjacent_to_entrance: bool,
    /// Overrides the generated display name
    pub label: Option<String>,
}

impl ZoneRequest {
    pub fn new(kind: ZoneKind, priority: Priority) -> Self {
        let adjacent_to_entrance = kind.faces_entrance();
        ZoneRequest {
            kind,
            requested_area: None,
            priority,
            adjacent_to_entrance,
            label: None,
        }
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.requested_area = Some(area);
        self
    }

    pub fn with_adjacent_to_entrance(mut self, adjacent: bool) -> Self {
        self.adjacent_to_entrance = adjacent;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The requested area, only if it is usable (strictly positive and finite)
    pub fn explicit_area(&self) -> Option<f64> {
        self.requested_area.filter(|a| a.is_finite() && *a > 0.0)
    }

    /// The zone synthesized when a briefing asks for nothing:
    /// a mandatory exhibition area of `min(fraction × stand area, cap)` next to the entrance.
    pub fn default_exhibition(stand: &StandSpec, fraction: f64, cap: f64) -> Self {
        let area = f64::min(fraction * stand.area_total(), cap);
        ZoneRequest::new(ZoneKind::Exhibition, Priority::High)
            .with_area(area)
            .with_adjacent_to_entrance(true)
    }
}

/// A zone that received a definitive position inside the stand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedZone {
    pub kind: ZoneKind,
    pub display_name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub area: f64,
    pub color: Color,
    pub priority: Priority,
}

impl PlacedZone {
    pub fn rect(&self) -> Rect {
        Rect {
            x_min: self.x,
            y_min: self.y,
            x_max: self.x + self.width,
            y_max: self.y + self.depth,
        }
    }
}

/// A non-mandatory zone for which no free position was found.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroppedZone {
    pub kind: ZoneKind,
    pub display_name: String,
    pub priority: Priority,
    pub width: f64,
    pub depth: f64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("exhibition", ZoneKind::Exhibition; "english")]
    #[test_case("area_exposicao", ZoneKind::Exhibition; "briefing alias")]
    #[test_case("Sala Reunião", ZoneKind::Meeting; "accents and spaces")]
    #[test_case("copa", ZoneKind::Pantry; "pantry alias")]
    #[test_case(" DEPOSITO ", ZoneKind::Storage; "uppercase padded")]
    #[test_case("balcão", ZoneKind::Counter; "counter alias")]
    #[test_case("workshop", ZoneKind::Other("workshop".into()); "unknown kind")]
    fn parse_zone_kind(input: &str, expected: ZoneKind) {
        assert_eq!(ZoneKind::from(input.to_string()), expected);
    }

    #[test]
    fn zone_kind_serde_as_string() {
        let json = serde_json::to_string(&ZoneKind::Meeting).unwrap();
        assert_eq!(json, "\"meeting\"");
        let kind: ZoneKind = serde_json::from_str("\"escritorio\"").unwrap();
        assert_eq!(kind, ZoneKind::Office);
    }

    #[test]
    fn priority_order_and_aliases() {
        assert!(Priority::High < Priority::Medium && Priority::Medium < Priority::Low);
        let p: Priority = serde_json::from_str("\"alta\"").unwrap();
        assert_eq!(p, Priority::High);
    }

    #[test]
    fn entrance_facing_defaults() {
        assert!(ZoneRequest::new(ZoneKind::Counter, Priority::Low).adjacent_to_entrance);
        assert!(!ZoneRequest::new(ZoneKind::Storage, Priority::Low).adjacent_to_entrance);
    }

    #[test_case(11.0, 8.0, 12.0; "capped")]
    #[test_case(4.0, 3.0, 7.2; "fraction")]
    fn default_exhibition_area(width: f64, depth: f64, expected: f64) {
        let stand = StandSpec::from_dimensions(width, depth).unwrap();
        let zone = ZoneRequest::default_exhibition(&stand, 0.6, 12.0);
        assert_eq!(zone.kind, ZoneKind::Exhibition);
        assert_eq!(zone.priority, Priority::High);
        assert!(zone.adjacent_to_entrance);
        assert!((zone.requested_area.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn non_positive_area_is_not_explicit() {
        let zone = ZoneRequest::new(ZoneKind::Demo, Priority::Low).with_area(0.0);
        assert_eq!(zone.explicit_area(), None);
    }
}
