//! Objects, their material slots and lamp data.
//!
//! Matrices are column-major `[[f32; 4]; 4]` arrays; convert with
//! `glam::Mat4::from_cols_array_2d` where math is needed.

use crate::material::MaterialId;

/// Column-major 4x4 identity matrix.
pub const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Kind of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LampKind {
    /// Omnidirectional point light with distance falloff.
    #[default]
    Local,
    /// Directional light at infinity.
    Sun,
    /// Cone light.
    Spot,
    /// Hemisphere light.
    Hemi,
    /// Area light.
    Area,
}

/// Light source data.
#[derive(Debug, Clone, PartialEq)]
pub struct Lamp {
    pub kind: LampKind,
    /// Colour `[r, g, b]`.
    pub color: [f32; 3],
    pub energy: f32,
    /// Falloff distance.
    pub distance: f32,
    /// Linear attenuation factor, divided by `distance`.
    pub att1: f32,
    /// Quadratic attenuation factor, divided by `distance²`.
    pub att2: f32,
    /// Full cone angle in degrees.
    pub spot_size: f32,
    /// Softness of the cone edge, 0..1.
    pub spot_blend: f32,
}

impl Default for Lamp {
    fn default() -> Self {
        Self {
            kind: LampKind::Local,
            color: [1.0, 1.0, 1.0],
            energy: 1.0,
            distance: 20.0,
            att1: 1.0,
            att2: 1.0,
            spot_size: 45.0,
            spot_blend: 0.15,
        }
    }
}

impl Lamp {
    pub fn new(kind: LampKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: [f32; 3], energy: f32) -> Self {
        self.color = color;
        self.energy = energy;
        self
    }

    pub fn with_attenuation(mut self, distance: f32, att1: f32, att2: f32) -> Self {
        self.distance = distance;
        self.att1 = att1;
        self.att2 = att2;
        self
    }

    pub fn with_spot(mut self, size: f32, blend: f32) -> Self {
        self.spot_size = size;
        self.spot_blend = blend;
        self
    }
}

/// Data an object carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ObjectData {
    #[default]
    Empty,
    Mesh,
    Lamp(Lamp),
}

/// An object placed in a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    /// Material slots. Slot numbers start at one; `None` is an empty slot.
    pub materials: Vec<Option<MaterialId>>,
    /// Layer bitmask.
    pub layer: u32,
    /// World matrix, column-major.
    pub matrix: [[f32; 4]; 4],
    pub data: ObjectData,
}

impl Object {
    /// A mesh object on layer 1 at the origin.
    pub fn mesh(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: Vec::new(),
            layer: 1,
            matrix: IDENTITY,
            data: ObjectData::Mesh,
        }
    }

    /// A lamp object on layer 1 at the origin.
    pub fn lamp(name: impl Into<String>, lamp: Lamp) -> Self {
        Self {
            data: ObjectData::Lamp(lamp),
            ..Self::mesh(name)
        }
    }

    #[must_use]
    pub fn with_materials(mut self, materials: Vec<Option<MaterialId>>) -> Self {
        self.materials = materials;
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    #[must_use]
    pub fn with_matrix(mut self, matrix: [[f32; 4]; 4]) -> Self {
        self.matrix = matrix;
        self
    }

    /// Number of material slots.
    pub fn slot_count(&self) -> usize {
        self.materials.len()
    }

    /// Material assigned to the 1-based `slot`, if any.
    pub fn material_slot(&self, slot: usize) -> Option<MaterialId> {
        slot.checked_sub(1)
            .and_then(|index| self.materials.get(index))
            .copied()
            .flatten()
    }

    /// Lamp data, when this object is a lamp.
    pub fn lamp_data(&self) -> Option<&Lamp> {
        match &self.data {
            ObjectData::Lamp(lamp) => Some(lamp),
            _ => None,
        }
    }
}
