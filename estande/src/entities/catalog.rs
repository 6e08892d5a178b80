use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::entities::ZoneKind;
use crate::io::svg::Color;

/// Width × depth pair (m)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
}

impl Footprint {
    pub const fn new(width: f64, depth: f64) -> Self {
        Footprint { width, depth }
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    /// width : depth
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.depth
    }
}

/// Everything the planner knows about a kind of zone
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub display_name: String,
    pub ideal: Footprint,
    pub minimum: Footprint,
    pub color: Color,
}

impl ZoneSpec {
    pub fn new(display_name: &str, ideal: Footprint, minimum: Footprint, color: Color) -> Self {
        ZoneSpec {
            display_name: display_name.to_string(),
            ideal,
            minimum,
            color,
        }
    }
}

/// Read-only table of ideal/minimum footprints, display names and colors per [`ZoneKind`].
/// Explicitly constructed and handed to whoever needs it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneCatalog {
    entries: BTreeMap<ZoneKind, ZoneSpec>,
    /// Used for kinds without an entry
    pub fallback: ZoneSpec,
}

impl ZoneCatalog {
    pub fn new(entries: impl IntoIterator<Item = (ZoneKind, ZoneSpec)>, fallback: ZoneSpec) -> Self {
        ZoneCatalog {
            entries: entries.into_iter().collect(),
            fallback,
        }
    }

    /// The entry of `kind`, `None` if the catalog does not know it
    pub fn lookup(&self, kind: &ZoneKind) -> Option<&ZoneSpec> {
        self.entries.get(kind)
    }

    /// The entry of `kind`, or the fallback entry for unknown kinds
    pub fn spec(&self, kind: &ZoneKind) -> &ZoneSpec {
        self.lookup(kind).unwrap_or(&self.fallback)
    }

    pub fn ideal(&self, kind: &ZoneKind) -> Footprint {
        self.spec(kind).ideal
    }

    pub fn color(&self, kind: &ZoneKind) -> Color {
        self.spec(kind).color
    }

    /// Human readable name of a kind. Unknown kinds keep their own name, capitalized.
    pub fn display_name(&self, kind: &ZoneKind) -> String {
        match self.lookup(kind) {
            Some(spec) => spec.display_name.clone(),
            None => capitalize(kind.as_str()),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ZoneKind> {
        self.entries.keys()
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        let entry = |name: &str, ideal: (f64, f64), min: (f64, f64), color: Color| {
            ZoneSpec::new(
                name,
                Footprint::new(ideal.0, ideal.1),
                Footprint::new(min.0, min.1),
                color,
            )
        };
        ZoneCatalog::new(
            [
                (ZoneKind::Reception, entry("Recepção", (3.0, 3.0), (2.0, 2.0), Color(0xFF, 0xE0, 0xB2))),
                (ZoneKind::Exhibition, entry("Exposição", (4.0, 4.0), (3.0, 3.0), Color(0xE3, 0xF2, 0xFD))),
                (ZoneKind::Meeting, entry("Sala de Reunião", (3.5, 4.0), (2.5, 3.0), Color(0xFF, 0xF9, 0xC4))),
                (ZoneKind::Pantry, entry("Copa", (2.0, 3.0), (1.5, 2.0), Color(0xC8, 0xE6, 0xC9))),
                (ZoneKind::Storage, entry("Depósito", (2.0, 2.5), (1.5, 1.5), Color(0xF5, 0xF5, 0xF5))),
                (ZoneKind::Office, entry("Escritório", (3.0, 3.5), (2.0, 2.5), Color(0xD1, 0xC4, 0xE9))),
                (ZoneKind::Demo, entry("Demonstração", (4.0, 5.0), (3.0, 3.0), Color(0xB3, 0xE5, 0xFC))),
                (ZoneKind::Counter, entry("Balcão", (1.5, 3.0), (1.0, 2.0), Color(0xFF, 0xCC, 0xBC))),
            ],
            entry("Área", (2.0, 2.0), (2.0, 2.0), Color(0xE0, 0xE0, 0xE0)),
        )
    }
}

/// Hands out display names of the form `"<kind display name> <n>"`, numbered per kind.
/// A label, when present, replaces the generated name but still counts.
#[derive(Debug)]
pub struct ZoneNamer<'a> {
    catalog: &'a ZoneCatalog,
    counts: HashMap<ZoneKind, usize>,
}

impl<'a> ZoneNamer<'a> {
    pub fn new(catalog: &'a ZoneCatalog) -> Self {
        ZoneNamer {
            catalog,
            counts: HashMap::new(),
        }
    }

    pub fn name(&mut self, kind: &ZoneKind, label: Option<&str>) -> String {
        let n = self.counts.entry(kind.clone()).or_insert(0);
        *n += 1;
        match label {
            Some(label) => label.to_string(),
            None => format!("{} {}", self.catalog.display_name(kind), n),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
