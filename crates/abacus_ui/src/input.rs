//! Touch input as delivered by the platform.
//!
//! Platforms coalesce pointer motion: one move event may carry several
//! historical points recorded since the previous event. The gesture handler
//! scans them on touch-down so a fast finger still grabs the bead it started
//! on.

/// Phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// Finger went down.
    Down,
    /// Finger moved while down.
    Move,
    /// Finger lifted.
    Up,
    /// The platform aborted the gesture.
    Cancel,
}

/// A single touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// Gesture phase.
    pub action: TouchAction,
    /// Current X position.
    pub x: f32,
    /// Current Y position.
    pub y: f32,
    /// Coalesced points preceding `(x, y)`, oldest first.
    pub history: Vec<(f32, f32)>,
}

impl TouchEvent {
    /// Creates an event without history.
    #[must_use]
    pub fn new(action: TouchAction, x: f32, y: f32) -> Self {
        Self {
            action,
            x,
            y,
            history: Vec::new(),
        }
    }

    /// Touch-down at a point.
    #[must_use]
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Down, x, y)
    }

    /// Move to a point.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Move, x, y)
    }

    /// Lift at a point.
    #[must_use]
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(TouchAction::Up, x, y)
    }

    /// Gesture aborted by the platform.
    #[must_use]
    pub fn cancel() -> Self {
        Self::new(TouchAction::Cancel, 0.0, 0.0)
    }

    /// Attaches coalesced historical points.
    #[must_use]
    pub fn with_history(mut self, history: Vec<(f32, f32)>) -> Self {
        self.history = history;
        self
    }

    /// Historical points followed by the current one.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.history.iter().copied().chain(std::iter::once((self.x, self.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_order() {
        let event = TouchEvent::moved(30.0, 40.0).with_history(vec![(10.0, 20.0), (20.0, 30.0)]);
        let points: Vec<_> = event.points().collect();
        assert_eq!(points, vec![(10.0, 20.0), (20.0, 30.0), (30.0, 40.0)]);
    }
}
