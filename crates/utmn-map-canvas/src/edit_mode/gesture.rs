//! Touch gestures: one finger pans, two fingers pinch-zoom.

use utmn_map_core::Point;

use crate::viewport::ViewportTransform;

/// Two-finger zoom anchored at the pinch centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchGesture {
    pub start_scale: f64,
    pub start_distance: f64,
}

impl PinchGesture {
    pub fn begin(a: Point, b: Point, viewport: &ViewportTransform) -> Option<Self> {
        let start_distance = a.distance_to(&b);
        (start_distance > f64::EPSILON).then_some(Self {
            start_scale: viewport.scale(),
            start_distance,
        })
    }

    /// Scale for the current finger distance, before clamping.
    pub fn scale_for(&self, distance: f64) -> f64 {
        self.start_scale * distance / self.start_distance
    }
}

/// Touch gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TouchGesture {
    #[default]
    Idle,
    Pan {
        last: Point,
    },
    Pinch(PinchGesture),
}

impl TouchGesture {
    /// Gesture for a new set of touches.
    pub fn begin(touches: &[Point], viewport: &ViewportTransform) -> Self {
        match touches {
            [only] => TouchGesture::Pan { last: *only },
            [a, b, ..] => PinchGesture::begin(*a, *b, viewport)
                .map(TouchGesture::Pinch)
                .unwrap_or_default(),
            [] => TouchGesture::Idle,
        }
    }

    /// Applies moved touches to the viewport. Returns whether it changed.
    pub fn update(&mut self, touches: &[Point], viewport: &mut ViewportTransform) -> bool {
        match (self, touches) {
            (TouchGesture::Pan { last }, [only, ..]) => {
                viewport.pan_by(only.x - last.x, only.y - last.y);
                *last = *only;
                true
            }
            (TouchGesture::Pinch(pinch), [a, b, ..]) => {
                let center = a.lerp(b, 0.5);
                let scale = pinch.scale_for(a.distance_to(b));
                viewport.zoom_to_scale_at(center.x, center.y, scale);
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, TouchGesture::Idle)
    }
}
