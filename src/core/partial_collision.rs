use std::cell::Cell;
use std::ops::Deref;

use crate::core::collider::ColliderRef;
use crate::core::collision::{effective_area, Collision, Narrowing, Unsubscribed};
use crate::error::CollisionError;
use crate::geometry::ProportionalBoundingBox;

/// A collision that only checks each participant's active area.
///
/// A box is either fixed on the collision (`new`, `with_active_areas`, the
/// `set_*_active_area` setters) or follows the participant's own
/// `PartialCollider::active_area`, read again on every recompute. Collisions
/// built by `ColliderExt::collision_with` follow both owners.
///
/// Both boxes of `new` are the full box, which makes a fresh partial
/// collision agree with a plain one. Replacing an area recomputes
/// immediately. Everything else (subscription, accessors) is the plain
/// `Collision` behavior, reached through `Deref`.
pub struct PartialCollision {
    collision: Collision,
}

impl PartialCollision {
    pub fn new(source: &ColliderRef, other: &ColliderRef) -> Self {
        Self::with_active_areas(
            source,
            other,
            ProportionalBoundingBox::full(),
            ProportionalBoundingBox::full(),
        )
    }

    pub fn with_active_areas(
        source: &ColliderRef,
        other: &ColliderRef,
        source_area: ProportionalBoundingBox,
        other_area: ProportionalBoundingBox,
    ) -> Self {
        Self::build(source, other, Some(source_area), Some(other_area))
    }

    /// A partial collision that narrows each side by its owner's current
    /// active area.
    pub fn following_owners(source: &ColliderRef, other: &ColliderRef) -> Self {
        Self::build(source, other, None, None)
    }

    fn build(
        source: &ColliderRef,
        other: &ColliderRef,
        source_area: Option<ProportionalBoundingBox>,
        other_area: Option<ProportionalBoundingBox>,
    ) -> Self {
        let narrowing = Narrowing::Proportional {
            source: Cell::new(source_area),
            other: Cell::new(other_area),
        };
        PartialCollision {
            collision: Collision::with_narrowing(source, other, narrowing),
        }
    }

    /// The box the source is currently narrowed by.
    pub fn source_active_area(&self) -> ProportionalBoundingBox {
        Self::resolve(self.areas().0, self.collision.source())
    }

    /// The box the other participant is currently narrowed by.
    pub fn other_active_area(&self) -> ProportionalBoundingBox {
        Self::resolve(self.areas().1, self.collision.other())
    }

    /// Fixes a new source area and recomputes. Returns whether an overlap exists.
    pub fn set_source_active_area(&self, area: ProportionalBoundingBox) -> bool {
        self.areas().0.set(Some(area));
        self.collision.recompute()
    }

    /// Fixes a new other area and recomputes. Returns whether an overlap exists.
    pub fn set_other_active_area(&self, area: ProportionalBoundingBox) -> bool {
        self.areas().1.set(Some(area));
        self.collision.recompute()
    }

    pub fn into_collision(self) -> Collision {
        self.collision
    }

    /// Ends this collision, removing its subscription.
    pub fn teardown(self) -> Unsubscribed {
        self.collision.teardown()
    }

    fn resolve(
        fixed: &Cell<Option<ProportionalBoundingBox>>,
        participant: Option<ColliderRef>,
    ) -> ProportionalBoundingBox {
        match participant {
            Some(participant) => effective_area(fixed.get(), &*participant),
            None => fixed.get().unwrap_or_default(),
        }
    }

    fn areas(
        &self,
    ) -> (
        &Cell<Option<ProportionalBoundingBox>>,
        &Cell<Option<ProportionalBoundingBox>>,
    ) {
        match &self.collision.inner.narrowing {
            Narrowing::Proportional { source, other } => (source, other),
            // the only constructors install proportional narrowing
            Narrowing::Full => unreachable!("partial collision without active areas"),
        }
    }
}

impl Deref for PartialCollision {
    type Target = Collision;

    fn deref(&self) -> &Collision {
        &self.collision
    }
}

impl From<PartialCollision> for Collision {
    fn from(partial: PartialCollision) -> Self {
        partial.collision
    }
}

impl TryFrom<Collision> for PartialCollision {
    type Error = CollisionError;

    fn try_from(collision: Collision) -> Result<Self, Self::Error> {
        if collision.is_partial() {
            Ok(PartialCollision { collision })
        } else {
            Err(CollisionError::type_error(format!(
                "{collision:?} was not created as a partial collision"
            )))
        }
    }
}
