//! Placed objects, their doors and the fixed object-type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_empty;
use crate::constants::HIDDEN_OBJECT_MARKER;
use crate::geometry::{Point, Rect};

/// Kind of a placed object.
///
/// The numeric ids are shared with the backend and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Lecture room / office ("cabinet")
    Cabinet,
    Department,
    ManToilet,
    WomanToilet,
    Stair,
    Wardrobe,
    Gym,
    Cafe,
    Canteen,
    ChillZone,
}

impl ObjectType {
    /// All types in id order.
    pub const ALL: [ObjectType; 10] = [
        ObjectType::Cabinet,
        ObjectType::Department,
        ObjectType::ManToilet,
        ObjectType::WomanToilet,
        ObjectType::Stair,
        ObjectType::Wardrobe,
        ObjectType::Gym,
        ObjectType::Cafe,
        ObjectType::Canteen,
        ObjectType::ChillZone,
    ];

    /// Looks up a type by its backend id. Unknown ids yield `None`.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Cabinet),
            2 => Some(Self::Department),
            3 => Some(Self::ManToilet),
            4 => Some(Self::WomanToilet),
            5 => Some(Self::Stair),
            6 => Some(Self::Wardrobe),
            7 => Some(Self::Gym),
            8 => Some(Self::Cafe),
            9 => Some(Self::Canteen),
            10 => Some(Self::ChillZone),
            _ => None,
        }
    }

    /// Backend id of this type.
    pub fn id(self) -> u32 {
        match self {
            Self::Cabinet => 1,
            Self::Department => 2,
            Self::ManToilet => 3,
            Self::WomanToilet => 4,
            Self::Stair => 5,
            Self::Wardrobe => 6,
            Self::Gym => 7,
            Self::Cafe => 8,
            Self::Canteen => 9,
            Self::ChillZone => 10,
        }
    }

    /// Wire name of this type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cabinet => "cabinet",
            Self::Department => "department",
            Self::ManToilet => "man-toilet",
            Self::WomanToilet => "woman-toilet",
            Self::Stair => "stair",
            Self::Wardrobe => "wardrobe",
            Self::Gym => "gym",
            Self::Cafe => "cafe",
            Self::Canteen => "canteen",
            Self::ChillZone => "chill-zone",
        }
    }

    /// Identifier of the icon asset drawn for this type.
    pub fn icon_id(self) -> &'static str {
        match self {
            Self::Cabinet => "point-icon",
            Self::WomanToilet => "women-toilet",
            other => other.name(),
        }
    }

    /// Labelled rooms show their name instead of an icon.
    pub fn is_labelled(self) -> bool {
        matches!(self, Self::Cabinet)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("Unknown object type: {s}"))
    }
}

/// Rectangular opening owned by one object. Doors are also graph nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub object_id: String,
}

impl Door {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// Axis-aligned room or amenity placed on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub object_type_id: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub doors: Vec<Door>,
}

impl PlacedObject {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        ObjectType::from_id(self.object_type_id)
    }

    /// Internal objects are kept in the data but never drawn.
    pub fn is_hidden(&self) -> bool {
        self.name.contains(HIDDEN_OBJECT_MARKER)
    }

    pub fn door(&self, door_id: &str) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == door_id)
    }
}

/// Payload for creating an object on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub alias: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub object_type_id: u32,
}

/// Partial update of an object. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type_id: Option<u32>,
}

impl ObjectPatch {
    /// Full patch carrying every editable field of `object`.
    pub fn from_object(object: &PlacedObject) -> Self {
        Self {
            name: Some(object.name.clone()),
            alias: Some(object.alias.clone()),
            description: Some(object.description.clone()),
            x: Some(object.x),
            y: Some(object.y),
            width: Some(object.width),
            height: Some(object.height),
            object_type_id: Some(object.object_type_id),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Applies the present fields to `object`.
    pub fn apply_to(&self, object: &mut PlacedObject) {
        if let Some(name) = &self.name {
            object.name = name.clone();
        }
        if let Some(alias) = &self.alias {
            object.alias = alias.clone();
        }
        if let Some(description) = &self.description {
            object.description = description.clone();
        }
        if let Some(x) = self.x {
            object.x = x;
        }
        if let Some(y) = self.y {
            object.y = y;
        }
        if let Some(width) = self.width {
            object.width = width;
        }
        if let Some(height) = self.height {
            object.height = height;
        }
        if let Some(type_id) = self.object_type_id {
            object.object_type_id = type_id;
        }
    }
}
