pub mod collider;
pub mod collision;
pub mod partial_collision;
pub mod positionable;

pub use collider::{Collider, ColliderExt, ColliderRef, PartialCollider};
pub use collision::{Collision, SubscribeMode, Unsubscribed};
pub use partial_collision::PartialCollision;
pub use positionable::{Positionable, ResizeCallback, ResizeEvent, ResizeHandle, ResizeNotifier};
