use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::{
    Collider, ColliderRef, PartialCollider, Positionable, ResizeCallback, ResizeEvent, ResizeHandle,
    ResizeNotifier,
};
use crate::direction::Direction;
use crate::geometry::{Position, ProportionalBoundingBox, Size};
use crate::scene::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Road,
    Junction,
    TrafficLight,
    Vehicle,
}

/// A positioned box inside a `Frame`.
///
/// The stored offset is measured from the frame's outer edge; the reported
/// position subtracts the frame's border so siblings share the frame's
/// inner coordinate space. Every change of offset, size or active area
/// notifies the resize subscribers.
pub struct Widget {
    name: String,
    kind: WidgetKind,
    offset: Cell<Position>,
    size: Cell<Size>,
    active_area: Cell<Option<ProportionalBoundingBox>>,
    parent: RefCell<Weak<Frame>>,
    notifier: ResizeNotifier,
}

impl Widget {
    pub fn new(name: impl Into<String>, kind: WidgetKind, offset: Position, size: Size) -> Rc<Self> {
        Rc::new(Widget {
            name: name.into(),
            kind,
            offset: Cell::new(offset),
            size: Cell::new(size),
            active_area: Cell::new(None),
            parent: RefCell::new(Weak::new()),
            notifier: ResizeNotifier::new(),
        })
    }

    /// A widget with the partial-collider capability.
    pub fn with_active_area(
        name: impl Into<String>,
        kind: WidgetKind,
        offset: Position,
        size: Size,
        active_area: ProportionalBoundingBox,
    ) -> Rc<Self> {
        let widget = Self::new(name, kind, offset, size);
        widget.active_area.set(Some(active_area));
        widget
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn offset(&self) -> Position {
        self.offset.get()
    }

    pub fn parent(&self) -> Option<Rc<Frame>> {
        self.parent.borrow().upgrade()
    }

    pub(crate) fn set_parent(&self, parent: &Rc<Frame>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    pub fn place(&self, offset: Position) {
        self.set_geometry(offset, self.size.get());
    }

    pub fn resize(&self, size: Size) {
        self.set_geometry(self.offset.get(), size);
    }

    pub fn move_in_direction(&self, direction: &Direction, step: f64) {
        self.place(self.offset.get().move_in_direction(direction, step));
    }

    pub fn set_geometry(&self, offset: Position, size: Size) {
        if offset == self.offset.get() && size == self.size.get() {
            return;
        }
        self.offset.set(offset);
        self.size.set(size);
        self.notifier.notify(&ResizeEvent {
            position: self.position(),
            size,
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.len()
    }
}

impl Positionable for Widget {
    fn position(&self) -> Position {
        let border = self.parent().map_or(0.0, |frame| frame.border_width());
        self.offset.get().offset(-border, -border)
    }

    fn size(&self) -> Size {
        self.size.get()
    }

    fn on_resize(&self, callback: ResizeCallback) -> ResizeHandle {
        self.notifier.subscribe(callback)
    }

    fn cancel_resize(&self, handle: ResizeHandle) -> bool {
        self.notifier.cancel(handle)
    }

    fn as_collider(self: Rc<Self>) -> Option<Rc<dyn Collider>> {
        Some(self)
    }
}

impl Collider for Widget {
    fn siblings(&self) -> Vec<ColliderRef> {
        self.parent().map(|frame| frame.colliders()).unwrap_or_default()
    }

    fn as_partial(&self) -> Option<&dyn PartialCollider> {
        match self.active_area.get() {
            Some(_) => Some(self),
            None => None,
        }
    }
}

impl PartialCollider for Widget {
    fn active_area(&self) -> ProportionalBoundingBox {
        self.active_area.get().unwrap_or_default()
    }

    fn set_active_area(&self, area: ProportionalBoundingBox) {
        if self.active_area.replace(Some(area)) == Some(area) {
            return;
        }
        self.notifier.notify(&ResizeEvent {
            position: self.position(),
            size: self.size.get(),
        });
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        let size = self.size.get();
        write!(
            f,
            "{:?}({:?} at {},{} size {}x{})",
            self.kind, self.name, position.x, position.y, size.width, size.height
        )
    }
}
