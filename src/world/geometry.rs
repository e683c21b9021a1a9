use glam::Vec2;

/// Axis-aligned box in pixel space (`min` = top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// `true` when any part of the box lies outside `[0, extent]`.
    #[inline]
    pub fn exceeds(&self, extent: Vec2) -> bool {
        self.min.x < 0.0 || self.min.y < 0.0 || self.max.x > extent.x || self.max.y > extent.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/*----------------------------- angles --------------------------------*/

/// Wrap any angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f32) -> f32 {
    let d = deg.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

/// Nearest multiple of 90°, with 360 folded back to 0.
#[inline]
pub fn to_cardinal(deg: f32) -> f32 {
    ((normalize_deg(deg) / 90.0).round() * 90.0) % 360.0
}

/// Heading in degrees from point `from` towards point `to`.
///
/// Screen space: x grows right, y grows *down*, so 90° points up.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let dx = from.x - to.x;
    let dy = to.y - from.y;
    let theta = 180.0 + dy.atan2(dx).to_degrees();
    normalize_deg(theta)
}

/// Unit step for heading `deg` in screen space.
///
/// Cardinals come back exact so a straight move never drifts on the
/// other axis.
pub fn heading(deg: f32) -> Vec2 {
    let deg = normalize_deg(deg);
    match deg {
        d if d == 0.0 => Vec2::new(1.0, 0.0),
        d if d == 90.0 => Vec2::new(0.0, -1.0),
        d if d == 180.0 => Vec2::new(-1.0, 0.0),
        d if d == 270.0 => Vec2::new(0.0, 1.0),
        _ => {
            let (s, c) = deg.to_radians().sin_cos();
            Vec2::new(c, -s)
        }
    }
}

/*--------------------------- directions ------------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub fn degrees(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => 90.0,
            Direction::Left => 180.0,
            Direction::Down => 270.0,
        }
    }

    /// Snap an arbitrary heading to the closest cardinal.
    pub fn from_degrees(deg: f32) -> Self {
        match to_cardinal(deg) as u32 {
            90 => Direction::Up,
            180 => Direction::Left,
            270 => Direction::Down,
            _ => Direction::Right,
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}
