//! Material data types for fixed-function and compiled-shader drawing.

use bitflags::bitflags;

/// Stable index of a [`Material`] inside a [`MaterialRegistry`](super::MaterialRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    /// Raw registry index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a shader program compiled from a material by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompiledMaterialHandle(pub u64);

bitflags! {
    /// Material shading flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFlags: u32 {
        /// Flat colour, no lighting.
        const SHADELESS = 1 << 0;
    }
}

/// Shader node tree attached to a material.
///
/// Only the active material node matters for drawing: fixed-function drawing
/// shows the material the active node points at instead of the owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTree {
    /// Material referenced by the active material node, if any.
    pub active_material: Option<MaterialId>,
}

/// Surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Display name.
    pub name: String,
    /// Diffuse colour `[r, g, b]`.
    pub color: [f32; 3],
    /// Specular colour `[r, g, b]`.
    pub specular_color: [f32; 3],
    /// Diffuse reflectivity.
    pub reflect: f32,
    /// Emission amount, added to reflectivity.
    pub emit: f32,
    /// Specular intensity.
    pub spec: f32,
    /// Opacity; anything below 1.0 needs blending.
    pub alpha: f32,
    /// Shading flags.
    pub flags: MaterialFlags,
    /// Whether [`node_tree`](Self::node_tree) overrides this material.
    pub use_nodes: bool,
    /// Shader node tree, if any.
    pub node_tree: Option<NodeTree>,
    /// Shader compiled from this material, filled in by the draw-state cache.
    pub compiled: Option<CompiledMaterialHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            color: [0.8, 0.8, 0.8],
            specular_color: [1.0, 1.0, 1.0],
            reflect: 0.8,
            emit: 0.0,
            spec: 0.5,
            alpha: 1.0,
            flags: MaterialFlags::empty(),
            use_nodes: false,
            node_tree: None,
            compiled: None,
        }
    }
}

impl Material {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_specular(mut self, color: [f32; 3], spec: f32) -> Self {
        self.specular_color = color;
        self.spec = spec;
        self
    }

    pub fn with_reflect(mut self, reflect: f32, emit: f32) -> Self {
        self.reflect = reflect;
        self.emit = emit;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn shadeless(mut self) -> Self {
        self.flags |= MaterialFlags::SHADELESS;
        self
    }

    /// Route drawing through a node tree whose active node shows `active`.
    pub fn with_nodes(mut self, active: Option<MaterialId>) -> Self {
        self.use_nodes = true;
        self.node_tree = Some(NodeTree {
            active_material: active,
        });
        self
    }

    /// Whether the material needs blending in fixed-function drawing.
    pub fn has_alpha(&self) -> bool {
        self.alpha != 1.0
    }
}
