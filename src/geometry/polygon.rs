use glam::Vec2;

/// A convex polygon with a world position and local-space vertices.
///
/// Derived data (transformed vertices, edges, and outward unit normals) is
/// cached and recomputed whenever the vertices, angle, or offset change.
/// `pos` is applied at projection time, so moving a polygon never
/// invalidates the cache.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub pos: Vec2,
    points: Vec<Vec2>,
    angle: f32,
    offset: Vec2,
    calc_points: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from counter-clockwise local-space vertices.
    pub fn new(pos: Vec2, points: Vec<Vec2>) -> Self {
        let mut polygon = Self {
            pos,
            points,
            angle: 0.0,
            offset: Vec2::ZERO,
            calc_points: Vec::new(),
            edges: Vec::new(),
            normals: Vec::new(),
        };
        polygon.recalc();
        polygon
    }

    pub fn set_points(&mut self, points: Vec<Vec2>) {
        self.points = points;
        self.recalc();
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.recalc();
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.recalc();
    }

    /// Rotate the local-space vertices in place.
    pub fn rotate(&mut self, angle: f32) {
        let rotation = Vec2::from_angle(angle);
        for point in &mut self.points {
            *point = rotation.rotate(*point);
        }
        self.recalc();
    }

    /// Translate the local-space vertices in place.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
        self.recalc();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Local-space vertices with the offset and rotation applied.
    pub fn calc_points(&self) -> &[Vec2] {
        &self.calc_points
    }

    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    /// Outward unit normals, one per edge.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    fn recalc(&mut self) {
        let len = self.points.len();
        let rotation = Vec2::from_angle(self.angle);

        self.calc_points.clear();
        self.edges.clear();
        self.normals.clear();

        for point in &self.points {
            self.calc_points.push(rotation.rotate(*point + self.offset));
        }

        for i in 0..len {
            let edge = self.calc_points[(i + 1) % len] - self.calc_points[i];
            self.edges.push(edge);
            self.normals.push(outward_normal(edge));
        }
    }
}

// Perpendicular (y, -x) of the edge direction. For counter-clockwise
// windings in a y-down coordinate system this faces out of the polygon.
fn outward_normal(edge: Vec2) -> Vec2 {
    Vec2::new(edge.y, -edge.x).normalize_or_zero()
}

/// An axis-aligned rectangle, convertible to a polygon.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    /// The rectangle as a four-vertex polygon anchored at its top left.
    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(
            self.pos,
            vec![
                Vec2::ZERO,
                Vec2::new(self.width, 0.0),
                Vec2::new(self.width, self.height),
                Vec2::new(0.0, self.height),
            ],
        )
    }
}
