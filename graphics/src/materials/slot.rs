//! Material slot contents.

use facedraw_core::material::{CompiledMaterialHandle, Material, MaterialFlags};

/// How `begin_object` prepares materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingMode {
    /// Fixed-function colours. Node materials show their active node.
    #[default]
    FixedFunction,
    /// Compile shaders where the host can, fixed-function colours elsewhere.
    Compiled,
}

/// Fixed-function material colours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedColors {
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl FixedColors {
    /// Colours showing `material`.
    ///
    /// Diffuse alpha is the material alpha only with `use_alpha`, otherwise 1.
    pub fn from_material(material: &Material, use_alpha: bool) -> Self {
        let [r, g, b] = material.color;
        let alpha = if use_alpha { material.alpha } else { 1.0 };

        if material.flags.contains(MaterialFlags::SHADELESS) {
            return Self {
                diffuse: [r, g, b, alpha],
                specular: [0.0; 4],
            };
        }

        let intensity = material.reflect + material.emit;
        let [sr, sg, sb] = material.specular_color;
        Self {
            diffuse: [intensity * r, intensity * g, intensity * b, alpha],
            specular: [material.spec * sr, material.spec * sg, material.spec * sb, 1.0],
        }
    }

    /// Unlit colours of the built-in default material.
    pub fn default_material(material: &Material) -> Self {
        let [r, g, b] = material.color;
        let [sr, sg, sb] = material.specular_color;
        Self {
            diffuse: [r, g, b, 1.0],
            specular: [sr, sg, sb, 1.0],
        }
    }
}

/// Shading chosen for a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotShading {
    FixedFunction(FixedColors),
    /// A compiled shader, with colours for draws that cannot feed its
    /// vertex attributes.
    Compiled {
        handle: CompiledMaterialHandle,
        fallback: FixedColors,
    },
}

impl Default for SlotShading {
    fn default() -> Self {
        Self::FixedFunction(FixedColors::default())
    }
}

impl SlotShading {
    /// Colours used when the slot is drawn without its shader.
    pub fn fixed_colors(&self) -> FixedColors {
        match self {
            Self::FixedFunction(colors) => *colors,
            Self::Compiled { fallback, .. } => *fallback,
        }
    }
}

/// One entry of the material buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialSlot {
    pub shading: SlotShading,
    /// Drawn in the alpha pass instead of the opaque one.
    pub has_alpha: bool,
}
