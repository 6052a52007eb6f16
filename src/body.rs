//! Physics body state for AABB actors.

use glam::Vec2;

use crate::geometry::{Polygon, Response};

/// Contact flags for the four sides of a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Per-body slope behaviour settings and cached collision state.
#[derive(Debug, Clone)]
pub struct SlopeBodyConfig {
    /// Friction coefficients, combined with the tile's per axis.
    pub friction: Vec2,
    /// Resolve sloped contacts along Y only when moving into the surface.
    pub prefer_y: bool,
    pub pull_up: f32,
    pub pull_down: f32,
    pub pull_left: f32,
    pub pull_right: f32,
    /// Accepted for configuration compatibility; snapping is inert.
    pub snap_up: f32,
    pub snap_down: f32,
    pub snap_left: f32,
    pub snap_right: f32,
    /// Leave velocity untouched by friction coefficients.
    pub skip_friction: bool,
    /// The body's velocity before the most recent collision response.
    pub velocity: Vec2,
    /// The response from the most recent collision test.
    pub last_response: Option<Response>,
}

impl Default for SlopeBodyConfig {
    fn default() -> Self {
        Self {
            friction: Vec2::ZERO,
            prefer_y: false,
            pull_up: 0.0,
            pull_down: 0.0,
            pull_left: 0.0,
            pull_right: 0.0,
            snap_up: 0.0,
            snap_down: 0.0,
            snap_left: 0.0,
            snap_right: 0.0,
            skip_friction: false,
            velocity: Vec2::ZERO,
            last_response: None,
        }
    }
}

/// An axis-aligned physics body, anchored at its top-left corner.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Restitution per axis; 0 kills the normal velocity, 1 reflects it.
    pub bounce: Vec2,
    pub width: f32,
    pub height: f32,
    pub enabled: bool,
    /// Collision polygon, attached when the body is enabled for slopes.
    pub polygon: Option<Polygon>,
    pub slopes: SlopeBodyConfig,
    /// Raw overlap vector of the most recent collision, pointing into the tile.
    pub overlap: Vec2,
    pub touching: Sides,
    pub blocked: Sides,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            bounce: Vec2::ZERO,
            width,
            height,
            enabled: true,
            polygon: None,
            slopes: SlopeBodyConfig::default(),
            overlap: Vec2::ZERO,
            touching: Sides::default(),
            blocked: Sides::default(),
        }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    /// Clear per-step contact flags. Call once before colliding each step.
    pub fn reset_flags(&mut self) {
        self.touching = Sides::default();
        self.blocked = Sides::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_edges() {
        let body = Body::new(10.0, 20.0, 8.0, 12.0);

        assert_eq!(body.left(), 10.0);
        assert_eq!(body.right(), 18.0);
        assert_eq!(body.top(), 20.0);
        assert_eq!(body.bottom(), 32.0);
    }

    #[test]
    fn test_reset_flags() {
        let mut body = Body::new(0.0, 0.0, 8.0, 8.0);
        body.touching.down = true;
        body.blocked.down = true;

        body.reset_flags();

        assert_eq!(body.touching, Sides::default());
        assert_eq!(body.blocked, Sides::default());
    }
}
