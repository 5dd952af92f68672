//! Marker drag sessions.
//!
//! One `DragSession` exists per active drag, owned by the map screen and
//! torn down explicitly on pointer-up -- there is no page-wide handler to
//! swap in and out. The session remembers where inside the marker the
//! pointer grabbed it, so the marker doesn't jump to the cursor on the
//! first move.

use hearth_core::{DeviceId, MapBounds, Position};

/// State for one in-progress marker drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    device: DeviceId,
    /// Pointer-to-marker-corner offset captured at mouse-down.
    grab_dx: f64,
    grab_dy: f64,
    marker_width: f64,
    marker_height: f64,
    current: Position,
}

impl DragSession {
    /// Begin a drag: `cursor` is where the pointer went down, `marker`
    /// is the marker's top-left corner at that moment.
    pub fn begin(
        device: DeviceId,
        marker: Position,
        cursor: Position,
        marker_width: f64,
        marker_height: f64,
    ) -> Self {
        Self {
            device,
            grab_dx: cursor.x - marker.x,
            grab_dy: cursor.y - marker.y,
            marker_width,
            marker_height,
            current: marker,
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// The marker position as of the latest move.
    pub fn position(&self) -> Position {
        self.current
    }

    /// Track a pointer move: the marker follows the cursor minus the
    /// grab offset, clamped inside the map.
    pub fn update(&mut self, cursor: Position, bounds: &MapBounds) -> Position {
        let target = Position::new(cursor.x - self.grab_dx, cursor.y - self.grab_dy);
        self.current = bounds.clamp(target, self.marker_width, self.marker_height);
        self.current
    }

    /// Tear the session down, yielding what to persist.
    pub fn finish(self) -> (DeviceId, Position) {
        (self.device, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> MapBounds {
        MapBounds::new(500.0, 300.0)
    }

    #[test]
    fn grab_offset_is_preserved_across_moves() {
        // Marker at (100, 100), grabbed 10px inside it.
        let mut session = DragSession::begin(
            DeviceId(1),
            Position::new(100.0, 100.0),
            Position::new(110.0, 105.0),
            100.0,
            50.0,
        );

        // Cursor moves 30 right, 20 down: marker does exactly the same.
        let pos = session.update(Position::new(140.0, 125.0), &bounds());
        assert_eq!(pos, Position::new(130.0, 120.0));
    }

    #[test]
    fn drag_clamps_to_container() {
        let mut session = DragSession::begin(
            DeviceId(1),
            Position::new(100.0, 100.0),
            Position::new(100.0, 100.0),
            100.0,
            50.0,
        );

        // Attempting x=450 in a 500-wide map with a 100-wide marker
        // pins the marker at 400.
        let pos = session.update(Position::new(450.0, 100.0), &bounds());
        assert_eq!(pos.x, 400.0);

        // Dragging past the top-left corner pins at the origin.
        let pos = session.update(Position::new(-50.0, -50.0), &bounds());
        assert_eq!(pos, Position::new(0.0, 0.0));
    }

    #[test]
    fn finish_yields_the_last_clamped_position() {
        let mut session = DragSession::begin(
            DeviceId(7),
            Position::new(0.0, 0.0),
            Position::new(0.0, 0.0),
            100.0,
            50.0,
        );
        session.update(Position::new(9999.0, 9999.0), &bounds());

        let (device, pos) = session.finish();
        assert_eq!(device, DeviceId(7));
        assert_eq!(pos, Position::new(400.0, 250.0));
    }
}
