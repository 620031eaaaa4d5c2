//! Concrete object positions: search witnesses and input layouts

use locus_core::{GridPoint, LocusError, Result, RoomSize, ROOM};
use locus_relation::Direction;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One object and the grid point it occupies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub name: String,
    pub position: GridPoint,
}

/// An ordered assignment of objects to grid points.
///
/// On disk this is a list of `[[object]]` tables with `name` and `position`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "object", default)]
    objects: Vec<PlacedObject>,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an object, moving it if it was already placed
    pub fn place(&mut self, name: impl Into<String>, position: GridPoint) {
        let name = name.into();
        match self.objects.iter_mut().find(|o| o.name == name) {
            Some(existing) => existing.position = position,
            None => self.objects.push(PlacedObject { name, position }),
        }
    }

    pub fn get(&self, name: &str) -> Option<GridPoint> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.position)
    }

    /// Direction of `subject` relative to `object`, if both are placed
    pub fn relation_between(&self, subject: &str, object: &str) -> Option<Direction> {
        Some(Direction::between(self.get(subject)?, self.get(object)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check every object is a real, uniquely named object inside the room
    pub fn validate(&self, room: RoomSize) -> Result<()> {
        for (i, obj) in self.objects.iter().enumerate() {
            if obj.name.is_empty() || obj.name == ROOM {
                return Err(LocusError::MalformedFact(format!(
                    "invalid object name '{}'",
                    obj.name
                )));
            }
            if self.objects[..i].iter().any(|o| o.name == obj.name) {
                return Err(LocusError::MalformedFact(format!(
                    "object '{}' is placed twice",
                    obj.name
                )));
            }
            room.check(obj.position)?;
        }
        Ok(())
    }

    /// Load a layout from a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl FromIterator<(String, GridPoint)> for Placement {
    fn from_iter<I: IntoIterator<Item = (String, GridPoint)>>(iter: I) -> Self {
        let mut placement = Placement::new();
        for (name, position) in iter {
            placement.place(name, position);
        }
        placement
    }
}
