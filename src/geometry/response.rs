use glam::Vec2;

/// The outcome of a collision test.
///
/// A response accumulates the minimum translation found across all tested
/// axes. One instance can serve many tests by calling [`Response::clear`]
/// between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Magnitude of the minimum translation vector.
    pub overlap: f32,
    /// Unit normal of the minimum translation axis.
    pub overlap_n: Vec2,
    /// The minimum translation vector itself (`overlap_n * overlap`).
    pub overlap_v: Vec2,
    /// Whether the first shape is entirely inside the second.
    pub a_in_b: bool,
    /// Whether the second shape is entirely inside the first.
    pub b_in_a: bool,
}

impl Response {
    pub fn new() -> Self {
        Self {
            overlap: f32::MAX,
            overlap_n: Vec2::ZERO,
            overlap_v: Vec2::ZERO,
            a_in_b: true,
            b_in_a: true,
        }
    }

    /// Reset for reuse before the next test.
    pub fn clear(&mut self) {
        self.overlap = f32::MAX;
        self.overlap_n = Vec2::ZERO;
        self.overlap_v = Vec2::ZERO;
        self.a_in_b = true;
        self.b_in_a = true;
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
