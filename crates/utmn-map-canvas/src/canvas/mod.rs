//! Map canvas session: state, input dispatch, persistence and rendering for
//! one building.

mod details;
mod session;

pub use details::{SelectedInfo, SelectionDetails};
pub use session::MapCanvas;

use utmn_map_core::ObjectType;

/// Progress of the building snapshot load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The snapshot could not be fetched; the canvas draws an empty frame.
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// Values entered in the create-object form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObjectForm {
    pub object_type: ObjectType,
    pub name: String,
    pub alias: String,
    pub description: String,
}

impl NewObjectForm {
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        Self {
            object_type,
            name: name.into(),
            alias: String::new(),
            description: String::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
