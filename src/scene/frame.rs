use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::{ColliderRef, Positionable, ResizeCallback, ResizeHandle, ResizeNotifier};
use crate::geometry::{Position, Size};
use crate::scene::widget::Widget;

/// A container that owns its children and answers sibling queries for them.
/// Frames are positionable but are not colliders themselves.
pub struct Frame {
    name: String,
    size: Size,
    border_width: f64,
    children: RefCell<Vec<Rc<dyn Positionable>>>,
    notifier: ResizeNotifier,
}

impl Frame {
    pub fn new(name: impl Into<String>, size: Size, border_width: f64) -> Rc<Self> {
        Rc::new(Frame {
            name: name.into(),
            size,
            border_width,
            children: RefCell::new(Vec::new()),
            notifier: ResizeNotifier::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    /// Adds `widget` as a child and makes this frame its parent.
    pub fn attach(frame: &Rc<Frame>, widget: &Rc<Widget>) {
        widget.set_parent(frame);
        frame.add_child(Rc::clone(widget) as Rc<dyn Positionable>);
    }

    /// Adds a child without touching its parent link.
    pub fn add_child(&self, child: Rc<dyn Positionable>) {
        self.children.borrow_mut().push(child);
    }

    pub fn children(&self) -> Vec<Rc<dyn Positionable>> {
        self.children.borrow().clone()
    }

    /// Children that are colliders, in insertion order.
    pub fn colliders(&self) -> Vec<ColliderRef> {
        self.children()
            .into_iter()
            .filter_map(|child| child.as_collider())
            .collect()
    }

}

impl Positionable for Frame {
    // frames are the root of the coordinate space
    fn position(&self) -> Position {
        Position::default()
    }

    fn size(&self) -> Size {
        self.size
    }

    fn on_resize(&self, callback: ResizeCallback) -> ResizeHandle {
        self.notifier.subscribe(callback)
    }

    fn cancel_resize(&self, handle: ResizeHandle) -> bool {
        self.notifier.cancel(handle)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("border_width", &self.border_width)
            .field("children", &self.children.borrow().len())
            .finish()
    }
}
