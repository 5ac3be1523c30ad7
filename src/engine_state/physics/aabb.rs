//! Axis-aligned boxes and the per-block push rule.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;

/// One of the three world axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The block face a push along this axis leaves through.
    pub fn exit_side(self, push: f32) -> BlockSide {
        match (self, push > 0.0) {
            (Axis::X, true) => BlockSide::RIGHT,
            (Axis::X, false) => BlockSide::LEFT,
            (Axis::Y, true) => BlockSide::TOP,
            (Axis::Y, false) => BlockSide::BOTTOM,
            (Axis::Z, true) => BlockSide::BACK,
            (Axis::Z, false) => BlockSide::FRONT,
        }
    }
}

/// A box given by its minimum corner and its extent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub position: Point3<f32>,
    pub size: Vector3<f32>,
}

impl Aabb {
    pub fn new(position: Point3<f32>, size: Vector3<f32>) -> Self {
        Aabb { position, size }
    }

    /// The unit box of the block at `block`.
    pub fn block(block: Point3<i32>) -> Self {
        Aabb::new(
            Point3::new(block.x as f32, block.y as f32, block.z as f32),
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    pub fn min(&self) -> Point3<f32> {
        self.position
    }

    pub fn max(&self) -> Point3<f32> {
        self.position + self.size
    }

    pub fn center(&self) -> Point3<f32> {
        self.position + self.size * 0.5
    }

    /// True if the interiors intersect. Touching faces do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        (0..3).all(|i| a_min[i] < b_max[i] && b_min[i] < a_max[i])
    }

    /// Moves the box along one axis.
    pub fn translate(&mut self, axis: Axis, amount: f32) {
        self.position[axis.index()] += amount;
    }
}

/// Signed distance that moves `[m_min, m_max]` out of `[b_min, b_max]`.
///
/// Of the two exits, the one needing the smaller move wins; equal moves go to
/// the positive side.
pub fn entry_push(m_min: f32, m_max: f32, b_min: f32, b_max: f32) -> f32 {
    let negative = b_min - m_max;
    let positive = b_max - m_min;
    if negative.abs() < positive.abs() {
        negative
    } else {
        positive
    }
}

/// Push that separates `mover` from `block` along each axis.
///
/// A component is zeroed when the block face it would leave through is
/// hidden in `exposed` (indexed by `BlockSide`).
///
/// # Returns
/// `None` if the boxes do not overlap
pub fn collide(mover: &Aabb, block: &Aabb, exposed: [bool; 6]) -> Option<Vector3<f32>> {
    if !mover.overlaps(block) {
        return None;
    }
    let (m_min, m_max) = (mover.min(), mover.max());
    let (b_min, b_max) = (block.min(), block.max());

    let mut push = Vector3::new(0.0, 0.0, 0.0);
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let i = axis.index();
        let amount = entry_push(m_min[i], m_max[i], b_min[i], b_max[i]);
        if exposed[axis.exit_side(amount).index()] {
            push[i] = amount;
        }
    }
    Some(push)
}

/// Picks the single axis a push is applied on.
///
/// Y wins when non-zero and no larger than any other non-zero component.
/// Otherwise Z wins when non-zero and strictly smaller than the other non-zero
/// components. Otherwise X, if it is non-zero.
pub fn select_axis(push: Vector3<f32>) -> Option<Axis> {
    let (x, y, z) = (push.x.abs(), push.y.abs(), push.z.abs());

    if y != 0.0 && (x == 0.0 || y <= x) && (z == 0.0 || y <= z) {
        Some(Axis::Y)
    } else if z != 0.0 && (x == 0.0 || z < x) && (y == 0.0 || z < y) {
        Some(Axis::Z)
    } else if x != 0.0 {
        Some(Axis::X)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EXPOSED: [bool; 6] = [true; 6];

    fn unit_block() -> Aabb {
        Aabb::block(Point3::new(0, 0, 0))
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let mover = Aabb::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        assert!(!mover.overlaps(&unit_block()));
        assert!(collide(&mover, &unit_block(), ALL_EXPOSED).is_none());
    }

    #[test]
    fn buried_mover_prefers_y_on_a_tie() {
        let mover = Aabb::new(Point3::new(0.1, 0.1, 0.1), Vector3::new(0.5, 0.5, 0.5));
        let push = collide(&mover, &unit_block(), ALL_EXPOSED).unwrap();

        assert!((push.x + 0.6).abs() < 1e-6);
        assert!((push.y + 0.6).abs() < 1e-6);
        assert!((push.z + 0.6).abs() < 1e-6);
        assert_eq!(select_axis(push), Some(Axis::Y));
    }

    #[test]
    fn hidden_face_suppresses_its_push() {
        let mover = Aabb::new(Point3::new(0.1, 0.1, 0.1), Vector3::new(0.5, 0.5, 0.5));
        let mut exposed = ALL_EXPOSED;
        exposed[BlockSide::BOTTOM.index()] = false;

        let push = collide(&mover, &unit_block(), exposed).unwrap();
        assert_eq!(push.y, 0.0);
        assert_eq!(select_axis(push), Some(Axis::X));
    }

    #[test]
    fn shallow_landing_pushes_up() {
        let mover = Aabb::new(Point3::new(0.2, 0.9, 0.2), Vector3::new(0.6, 1.8, 0.6));
        let push = collide(&mover, &unit_block(), ALL_EXPOSED).unwrap();
        assert!((push.y - 0.1).abs() < 1e-6);
        assert_eq!(select_axis(push), Some(Axis::Y));
    }

    #[test]
    fn axis_priority_is_asymmetric_between_x_and_z() {
        assert_eq!(select_axis(Vector3::new(0.3, 0.5, 0.3)), Some(Axis::X));
        assert_eq!(select_axis(Vector3::new(0.4, 0.5, 0.3)), Some(Axis::Z));
        assert_eq!(select_axis(Vector3::new(0.3, 0.3, 0.3)), Some(Axis::Y));
        assert_eq!(select_axis(Vector3::new(0.0, 0.6, 0.5)), Some(Axis::Z));
        assert_eq!(select_axis(Vector3::new(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn equal_exits_go_positive() {
        assert_eq!(entry_push(0.25, 0.75, 0.0, 1.0), 0.75);
        assert_eq!(entry_push(0.5, 1.5, 0.0, 1.0), 0.5);
        assert_eq!(entry_push(-0.5, 0.5, 0.0, 1.0), -0.5);
    }
}
