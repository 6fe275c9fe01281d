use wide::f32x4;

/// A closed range of ray parameters `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    #[inline]
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same interval with `max` replaced, used to shrink the search window
    /// down to the closest hit found so far.
    #[inline]
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

/// Four intervals in lane layout, one per ray of a packet.
#[derive(Debug, Clone, Copy)]
pub struct IntervalX4 {
    pub min: f32x4,
    pub max: f32x4,
}

impl IntervalX4 {
    /// Transpose four scalar intervals into lanes.
    #[inline]
    pub fn from_intervals(ray_t: &[Interval; 4]) -> Self {
        Self {
            min: f32x4::new([ray_t[0].min, ray_t[1].min, ray_t[2].min, ray_t[3].min]),
            max: f32x4::new([ray_t[0].max, ray_t[1].max, ray_t[2].max, ray_t[3].max]),
        }
    }

    /// Per-lane inclusive containment mask, matching [`Interval::contains`].
    #[inline]
    pub fn contains(&self, x: f32x4) -> f32x4 {
        use wide::{CmpGe, CmpLe};
        x.cmp_ge(self.min) & x.cmp_le(self.max)
    }
}
