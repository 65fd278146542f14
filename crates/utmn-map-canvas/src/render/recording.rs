use super::display_list::{DisplayList, DrawCommand};
use super::Surface;

/// Surface that keeps the last executed display list.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    last: DisplayList,
    frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &DisplayList {
        &self.last
    }

    pub fn commands(&self) -> &[DrawCommand] {
        self.last.commands()
    }

    /// Number of frames executed so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Surface for RecordingSurface {
    fn execute(&mut self, list: &DisplayList) {
        self.last = list.clone();
        self.frames += 1;
    }
}
