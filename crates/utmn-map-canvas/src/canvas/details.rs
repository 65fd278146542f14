//! Information shown for the current selection.

use utmn_map_core::{BuildingSnapshot, ObjectType, PlacedObject};

use crate::edit_mode::Selection;

const UNNAMED: &str = "Unnamed";

fn display_name(object: &PlacedObject) -> String {
    if object.name.trim().is_empty() {
        UNNAMED.to_string()
    } else {
        object.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectedInfo {
    Object {
        name: String,
        alias: String,
        description: String,
        object_type: Option<ObjectType>,
    },
    Door {
        label: String,
        owner_name: String,
    },
}

/// Building, floor and object or door details for an info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDetails {
    pub building_name: String,
    pub building_address: String,
    /// One-based position of the floor in the building.
    pub floor_number: usize,
    pub floor_name: String,
    pub info: SelectedInfo,
}

impl SelectionDetails {
    /// Details for `selection`, or `None` if it no longer exists in the
    /// snapshot.
    pub fn describe(snapshot: &BuildingSnapshot, selection: &Selection) -> Option<Self> {
        let (floor, info) = match selection {
            Selection::Object { id, .. } => {
                let (floor, object) = snapshot.find_object(id)?;
                let info = SelectedInfo::Object {
                    name: display_name(object),
                    alias: object.alias.clone(),
                    description: object.description.clone(),
                    object_type: object.object_type(),
                };
                (floor, info)
            }
            Selection::Door { id, .. } => {
                let (floor, owner, _) = snapshot.find_door(id)?;
                let owner_name = display_name(owner);
                let label = match owner.doors.iter().position(|d| &d.id == id) {
                    Some(index) if owner.doors.len() > 1 => {
                        format!("{} (door {})", owner_name, index + 1)
                    }
                    _ => owner_name.clone(),
                };
                (floor, SelectedInfo::Door { label, owner_name })
            }
        };

        Some(Self {
            building_name: snapshot.building.name.clone(),
            building_address: snapshot.building.address.clone(),
            floor_number: snapshot.floor_index(floor.id()).map_or(0, |i| i + 1),
            floor_name: floor.name().to_string(),
            info,
        })
    }
}
