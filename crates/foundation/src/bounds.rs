use crate::math::Vec3;

/// Axis-aligned bounding boxes
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb3 { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Aabb3::new(first, first);
        for p in iter {
            b.extend(p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = Vec3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vec3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max).scale(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb3;
    use crate::math::Vec3;

    #[test]
    fn from_points_covers_all() {
        let b = Aabb3::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 4.0, 2.0),
            Vec3::new(0.0, 0.0, -3.0),
        ])
        .expect("non-empty");
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(b.center(), Vec3::new(0.0, 1.0, -0.5));
    }

    #[test]
    fn empty_input_has_no_bounds() {
        assert!(Aabb3::from_points([]).is_none());
    }
}
