//! Scenes and views.

mod types;

pub use types::{Base, ObjectId, Scene, View};
