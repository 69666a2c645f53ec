//! Scene and view data types.

use crate::object::{Object, IDENTITY};

/// Stable index of an [`Object`] inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

/// Placement of an object in the scene, with the layers it is visible on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base {
    pub object: ObjectId,
    /// Layer bitmask of this placement.
    pub layer: u32,
}

/// A scene: objects and their placements.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Object>,
    bases: Vec<Base>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and place it on the object's own layers.
    pub fn add(&mut self, object: Object) -> ObjectId {
        let layer = object.layer;
        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        self.bases.push(Base { object: id, layer });
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    /// Placements in insertion order.
    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    /// Placements paired with their objects.
    pub fn placed_objects(&self) -> impl Iterator<Item = (&Base, &Object)> {
        self.bases
            .iter()
            .filter_map(|base| self.objects.get(base.object.0).map(|object| (base, object)))
    }
}

/// The viewport being drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Whether this draw is the second pass for alpha-blended geometry.
    pub transparent_pass: bool,
    /// World-to-view matrix, column-major.
    pub view_matrix: [[f32; 4]; 4],
    /// View-to-world matrix, column-major.
    pub view_inverse: [[f32; 4]; 4],
}

impl Default for View {
    fn default() -> Self {
        Self {
            transparent_pass: false,
            view_matrix: IDENTITY,
            view_inverse: IDENTITY,
        }
    }
}

impl View {
    /// The same view, drawing the alpha pass.
    #[must_use]
    pub fn alpha_pass(mut self) -> Self {
        self.transparent_pass = true;
        self
    }
}
