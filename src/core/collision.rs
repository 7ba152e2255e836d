use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::core::collider::{Collider, ColliderRef};
use crate::core::positionable::{ResizeEvent, ResizeHandle};
use crate::error::{CollisionError, Result};
use crate::geometry::{IntervalMath, OverlapArea, Position, ProportionalBoundingBox, Size};

/// What `subscribe_with` does when this collision is already subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscribeMode {
    /// Fail with a state error.
    #[default]
    Strict,
    /// Drop the existing subscription and register a fresh one.
    Overwrite,
}

/// How much of the subscription `unsubscribe` was able to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsubscribed {
    /// Both participants had a callback from this collision.
    Both,
    /// Only one participant did.
    Partial,
    /// Neither did.
    Nothing,
}

impl Unsubscribed {
    pub fn is_complete(&self) -> bool {
        *self == Unsubscribed::Both
    }
}

/// How each participant's rectangle is narrowed before the overlap test.
pub(crate) enum Narrowing {
    Full,
    /// `None` follows the participant's own active area at recompute time.
    Proportional {
        source: Cell<Option<ProportionalBoundingBox>>,
        other: Cell<Option<ProportionalBoundingBox>>,
    },
}

/// The box a participant is narrowed by: a fixed override if one is set,
/// otherwise the participant's current active area, otherwise the full box.
pub(crate) fn effective_area(
    fixed: Option<ProportionalBoundingBox>,
    participant: &dyn Collider,
) -> ProportionalBoundingBox {
    fixed
        .or_else(|| participant.as_partial().map(|partial| partial.active_area()))
        .unwrap_or_default()
}

pub(crate) struct CollisionInner {
    source: Weak<dyn Collider>,
    other: Weak<dyn Collider>,
    pub(crate) narrowing: Narrowing,
    area: Cell<Option<OverlapArea>>,
    source_handle: Cell<Option<ResizeHandle>>,
    other_handle: Cell<Option<ResizeHandle>>,
}

impl CollisionInner {
    fn recompute(&self) -> bool {
        let (Some(source), Some(other)) = (self.source.upgrade(), self.other.upgrade()) else {
            warn!("collision participant was dropped; clearing overlap");
            self.area.set(None);
            return false;
        };

        let (source_ranges, other_ranges) = match &self.narrowing {
            Narrowing::Full => (source.dimension_ranges(), other.dimension_ranges()),
            Narrowing::Proportional {
                source: source_area,
                other: other_area,
            } => (
                effective_area(source_area.get(), &*source).to_concrete_ranges(&source.dimension_ranges()),
                effective_area(other_area.get(), &*other).to_concrete_ranges(&other.dimension_ranges()),
            ),
        };

        let area = IntervalMath::rectangle_overlap(&source_ranges, &other_ranges);
        self.area.set(area);
        debug!(source = ?source, other = ?other, area = ?area, "recomputed collision");
        area.is_some()
    }

    fn is_subscribed(&self) -> bool {
        self.source_handle.get().is_some() || self.other_handle.get().is_some()
    }

    fn unsubscribe(&self) -> Unsubscribed {
        let source_removed = Self::cancel(&self.source, &self.source_handle, "source");
        let other_removed = Self::cancel(&self.other, &self.other_handle, "other");
        match (source_removed, other_removed) {
            (true, true) => Unsubscribed::Both,
            (false, false) => Unsubscribed::Nothing,
            _ => Unsubscribed::Partial,
        }
    }

    fn cancel(participant: &Weak<dyn Collider>, slot: &Cell<Option<ResizeHandle>>, role: &str) -> bool {
        let Some(handle) = slot.take() else {
            warn!(role, "no resize subscription to remove");
            return false;
        };
        match participant.upgrade() {
            Some(participant) => participant.cancel_resize(handle),
            None => {
                warn!(role, "participant dropped before its subscription was removed");
                false
            }
        }
    }
}

/// A pairwise overlap between two colliders.
///
/// The overlap is computed on construction and cached. It changes only
/// through `recompute`, called explicitly or by the resize callbacks that
/// `subscribe` registers on both participants. Participants are held weakly;
/// a dropped participant reads as no overlap.
///
/// Dropping a collision removes any subscription it still holds.
pub struct Collision {
    pub(crate) inner: Rc<CollisionInner>,
}

impl Collision {
    pub fn new(source: &ColliderRef, other: &ColliderRef) -> Self {
        Self::with_narrowing(source, other, Narrowing::Full)
    }

    pub(crate) fn with_narrowing(source: &ColliderRef, other: &ColliderRef, narrowing: Narrowing) -> Self {
        let collision = Collision {
            inner: Rc::new(CollisionInner {
                source: Rc::downgrade(source),
                other: Rc::downgrade(other),
                narrowing,
                area: Cell::new(None),
                source_handle: Cell::new(None),
                other_handle: Cell::new(None),
            }),
        };
        collision.recompute();
        collision
    }

    /// Recomputes the overlap from current geometry. Returns whether one exists.
    pub fn recompute(&self) -> bool {
        self.inner.recompute()
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.inner.narrowing, Narrowing::Proportional { .. })
    }

    pub fn source(&self) -> Option<ColliderRef> {
        self.inner.source.upgrade()
    }

    pub fn other(&self) -> Option<ColliderRef> {
        self.inner.other.upgrade()
    }

    /// Registers resize callbacks on both participants that recompute this
    /// collision. Fails if a subscription is already active.
    pub fn subscribe(&self) -> Result<()> {
        self.subscribe_with(SubscribeMode::Strict)
    }

    pub fn subscribe_with(&self, mode: SubscribeMode) -> Result<()> {
        if self.inner.is_subscribed() {
            match mode {
                SubscribeMode::Strict => {
                    return Err(CollisionError::state(format!(
                        "{self:?} is already subscribed; use SubscribeMode::Overwrite to replace it"
                    )));
                }
                SubscribeMode::Overwrite => {
                    warn!(collision = ?self, "overwriting existing resize subscription");
                    self.inner.unsubscribe();
                }
            }
        }

        let (Some(source), Some(other)) = (self.source(), self.other()) else {
            return Err(CollisionError::state(format!(
                "{self:?} cannot subscribe: a participant was dropped"
            )));
        };

        let source_handle = source.on_resize(self.recompute_callback());
        let other_handle = other.on_resize(self.recompute_callback());
        self.inner.source_handle.set(Some(source_handle));
        self.inner.other_handle.set(Some(other_handle));
        Ok(())
    }

    /// Removes both resize callbacks. Never fails; the result reports how
    /// many were actually present.
    pub fn unsubscribe(&self) -> Unsubscribed {
        self.inner.unsubscribe()
    }

    pub fn is_subscribed(&self) -> bool {
        self.inner.is_subscribed()
    }

    /// Ends this collision, removing its subscription.
    pub fn teardown(self) -> Unsubscribed {
        self.unsubscribe()
    }

    fn recompute_callback(&self) -> Box<dyn Fn(&ResizeEvent)> {
        let inner = Rc::downgrade(&self.inner);
        Box::new(move |_event: &ResizeEvent| {
            if let Some(inner) = inner.upgrade() {
                inner.recompute();
            }
        })
    }

    pub fn has_overlap(&self) -> bool {
        self.inner.area.get().is_some()
    }

    pub fn geometry(&self) -> Result<OverlapArea> {
        self.area_for("geometry")
    }

    pub fn x(&self) -> Result<f64> {
        Ok(self.area_for("x")?.x)
    }

    pub fn y(&self) -> Result<f64> {
        Ok(self.area_for("y")?.y)
    }

    pub fn width(&self) -> Result<f64> {
        Ok(self.area_for("width")?.width)
    }

    pub fn height(&self) -> Result<f64> {
        Ok(self.area_for("height")?.height)
    }

    pub fn origin(&self) -> Result<Position> {
        let area = self.area_for("origin")?;
        Ok(Position::new(area.x, area.y))
    }

    pub fn dimensions(&self) -> Result<Size> {
        let area = self.area_for("dimensions")?;
        Ok(Size::new(area.width, area.height))
    }

    /// Top-left and bottom-right corners of the overlap.
    pub fn corners(&self) -> Result<(Position, Position)> {
        let ((x0, y0), (x1, y1)) = self.area_for("corners")?.corners();
        Ok((Position::new(x0, y0), Position::new(x1, y1)))
    }

    fn area_for(&self, accessor: &str) -> Result<OverlapArea> {
        self.inner.area.get().ok_or_else(|| {
            CollisionError::not_ready(format!("{self:?}.{accessor}() read with no overlap recorded"))
        })
    }
}

impl Drop for Collision {
    fn drop(&mut self) {
        if self.inner.is_subscribed() {
            self.inner.unsubscribe();
        }
    }
}

impl fmt::Debug for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.is_partial() { "PartialCollision" } else { "Collision" };
        write!(f, "{name}(")?;
        write_participant(f, self.source())?;
        f.write_str(", ")?;
        write_participant(f, self.other())?;
        f.write_str(")")
    }
}

fn write_participant(f: &mut fmt::Formatter<'_>, participant: Option<ColliderRef>) -> fmt::Result {
    match participant {
        Some(participant) => write!(f, "{participant:?}"),
        None => f.write_str("<dropped>"),
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}; ")?;
        match self.inner.area.get() {
            Some(area) => write!(
                f,
                "(x: {}, y: {}, width: {}, height: {})",
                area.x, area.y, area.width, area.height
            ),
            None => f.write_str("no overlap"),
        }
    }
}
