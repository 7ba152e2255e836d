use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::core::collider::Collider;
use crate::geometry::{Position, Size};

/// Identifies one registered resize callback so it can be cancelled later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeHandle(u64);

/// Geometry of an entity after it moved or changed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub position: Position,
    pub size: Size,
}

pub type ResizeCallback = Box<dyn Fn(&ResizeEvent)>;

/// Something placed on screen that can report where it is and announce
/// when that changes. Positions share the coordinate space of a common
/// ancestor.
pub trait Positionable: fmt::Debug {
    fn position(&self) -> Position;

    fn size(&self) -> Size;

    /// Top-left and bottom-right corners.
    fn corners(&self) -> (Position, Position) {
        let top_left = self.position();
        (top_left, top_left.extended_by(self.size()))
    }

    fn on_resize(&self, callback: ResizeCallback) -> ResizeHandle;

    /// Returns `false` if `handle` was not registered here.
    fn cancel_resize(&self, handle: ResizeHandle) -> bool;

    /// Capability query: the same entity viewed as a collider, if it is one.
    fn as_collider(self: Rc<Self>) -> Option<Rc<dyn Collider>> {
        None
    }
}

/// Registry of resize callbacks for one entity.
///
/// Callbacks run synchronously inside `notify`, in registration order. The
/// list is snapshotted first, so a callback may register or cancel others
/// without tripping a borrow.
#[derive(Default)]
pub struct ResizeNotifier {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(ResizeHandle, Rc<dyn Fn(&ResizeEvent)>)>>,
}

impl ResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: ResizeCallback) -> ResizeHandle {
        let handle = ResizeHandle(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.callbacks.borrow_mut().push((handle, Rc::from(callback)));
        handle
    }

    pub fn cancel(&self, handle: ResizeHandle) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(registered, _)| *registered != handle);
        callbacks.len() != before
    }

    pub fn notify(&self, event: &ResizeEvent) {
        let snapshot: Vec<Rc<dyn Fn(&ResizeEvent)>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.borrow().is_empty()
    }
}

impl fmt::Debug for ResizeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeNotifier")
            .field("callbacks", &self.len())
            .finish()
    }
}
