use std::rc::Rc;

use tracing::debug;

use crate::core::collision::Collision;
use crate::core::partial_collision::PartialCollision;
use crate::core::positionable::Positionable;
use crate::error::{CollisionError, Result};
use crate::geometry::{DimensionRanges, ProportionalBoundingBox};

pub type ColliderRef = Rc<dyn Collider>;

/// An entity whose rectangle can be tested for overlap against others.
pub trait Collider: Positionable {
    fn dimension_ranges(&self) -> DimensionRanges {
        DimensionRanges::from_position_and_size(self.position(), self.size())
    }

    /// Colliders sharing this entity's parent, supplied by the host tree.
    /// May include this entity itself.
    fn siblings(&self) -> Vec<ColliderRef> {
        Vec::new()
    }

    /// Capability query for an active area.
    fn as_partial(&self) -> Option<&dyn PartialCollider> {
        None
    }
}

/// A collider with only a proportional part of its area active for overlap checks.
pub trait PartialCollider: Collider {
    /// A copy of the current active area.
    fn active_area(&self) -> ProportionalBoundingBox;

    /// Replaces the active area as a whole. Collisions following this
    /// owner pick the new box up on their next recompute.
    fn set_active_area(&self, area: ProportionalBoundingBox);

    /// The active area in concrete coordinates.
    fn active_area_ranges(&self) -> DimensionRanges {
        self.active_area().to_concrete_ranges(&self.dimension_ranges())
    }
}

/// Pairing operations on shared colliders.
pub trait ColliderExt {
    /// A new collision between this collider and `other`. When both sides are
    /// partial colliders the result is a partial collision that follows each
    /// side's current active area.
    fn collision_with(&self, other: &ColliderRef) -> Collision;

    /// Like `collision_with`, for a host entity that may not be a collider.
    fn try_collision_with(&self, other: Rc<dyn Positionable>) -> Result<Collision>;

    /// Overlapping collisions against `candidates`, or against this entity's
    /// siblings when `None`. Self is skipped; order follows the candidates.
    fn collisions(&self, candidates: Option<&[ColliderRef]>) -> Vec<Collision>;

    /// The `other` participant of each entry `collisions` would return.
    fn colliding_objects(&self, candidates: Option<&[ColliderRef]>) -> Vec<ColliderRef>;
}

impl ColliderExt for ColliderRef {
    fn collision_with(&self, other: &ColliderRef) -> Collision {
        match (self.as_partial(), other.as_partial()) {
            (Some(_), Some(_)) => PartialCollision::following_owners(self, other).into_collision(),
            _ => Collision::new(self, other),
        }
    }

    fn try_collision_with(&self, other: Rc<dyn Positionable>) -> Result<Collision> {
        let description = format!("{other:?}");
        match other.as_collider() {
            Some(collider) => Ok(self.collision_with(&collider)),
            None => Err(CollisionError::type_error(format!(
                "{description} does not implement Collider"
            ))),
        }
    }

    fn collisions(&self, candidates: Option<&[ColliderRef]>) -> Vec<Collision> {
        let siblings;
        let candidates = match candidates {
            Some(candidates) => candidates,
            None => {
                siblings = self.siblings();
                siblings.as_slice()
            }
        };

        if candidates.is_empty() {
            debug!(collider = ?self, "no candidates to check for collisions");
        }

        candidates
            .iter()
            .filter(|candidate| !same_entity(self, candidate))
            .map(|candidate| self.collision_with(candidate))
            .filter(Collision::has_overlap)
            .collect()
    }

    fn colliding_objects(&self, candidates: Option<&[ColliderRef]>) -> Vec<ColliderRef> {
        self.collisions(candidates)
            .iter()
            .filter_map(Collision::other)
            .collect()
    }
}

/// Identity comparison that ignores which vtable a pointer was built with.
pub fn same_entity(a: &ColliderRef, b: &ColliderRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
