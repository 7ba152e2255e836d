//! Overlap detection for widgets of a four-way intersection simulation.
//!
//! `geometry` holds the interval math and proportional bounding boxes,
//! `core` the collider capability and live-tracked collisions, and `scene`
//! a headless widget tree that hosts them.

pub mod constants;
pub mod core;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod scene;

pub use error::{CollisionError, Result};
