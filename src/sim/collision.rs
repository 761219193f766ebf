//! Collision primitives and the injected overlap capability
//!
//! The state machine never resolves geometry itself: it asks a
//! [`CollisionSource`] whether two boxes overlap. Hosts with a real
//! physics stack inject their own source; tests and the bundled driver
//! use the plain AABB default.

use serde::{Deserialize, Serialize};

/// Axis-aligned box. `y` is the top edge; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict intersection test; boxes that merely share an edge do not overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Overlap oracle injected into the state machine
pub trait CollisionSource {
    fn overlaps(&self, a: &Rect, b: &Rect) -> bool;
}

/// Default overlap source: plain AABB intersection
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbOverlap;

impl CollisionSource for AabbOverlap {
    fn overlaps(&self, a: &Rect, b: &Rect) -> bool {
        a.intersects(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(AabbOverlap.overlaps(&a, &b), AabbOverlap.overlaps(&b, &a));
        }

        #[test]
        fn rect_overlaps_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.intersects(&r));
        }
    }
}
