//! State enums and small value types shared by all backends.

/// Server-side capability toggled with enable/disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AlphaTest,
    Blend,
    ColorMaterial,
    CullFace,
    DepthTest,
    Fog,
    /// One of the eight fixed-function lights.
    Light(u32),
    Lighting,
    LogicOp,
    /// Renormalize normals after scaling transforms.
    Normalize,
    StencilTest,
    Texture1D,
    Texture2D,
    TextureGenS,
    TextureGenT,
}

/// Blend factor for the fixed blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Comparison used by depth and alpha tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    Greater,
    LessEqual,
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Linear,
    LinearMipmapNearest,
    LinearMipmapLinear,
}

impl TextureFilter {
    /// Minification filter for mip-mapped textures.
    pub fn mipmap(linear: bool) -> Self {
        if linear {
            Self::LinearMipmapLinear
        } else {
            Self::LinearMipmapNearest
        }
    }
}

/// Texture coordinate wrapping along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

/// Pixel-store parameters used when reading client pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelUnpack {
    /// Pixels per source row; zero means "same as upload width".
    pub row_length: u32,
    /// Pixels skipped at the start of each row.
    pub skip_pixels: u32,
    /// Rows skipped at the start of the source.
    pub skip_rows: u32,
}

/// Fixed-function material parameter, applied to front and back faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialParam {
    Ambient([f32; 4]),
    Diffuse([f32; 4]),
    Specular([f32; 4]),
    Shininess(f32),
}

/// Fixed-function light parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightParam {
    /// Position in eye space; `w == 0` for directional lights.
    Position([f32; 4]),
    Diffuse([f32; 4]),
    Specular([f32; 4]),
    SpotDirection([f32; 3]),
    /// Half-angle of the cone in degrees; 180 disables the cone.
    SpotCutoff(f32),
    SpotExponent(f32),
    ConstantAttenuation(f32),
    LinearAttenuation(f32),
    QuadraticAttenuation(f32),
}

/// Client-side vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientArray {
    Vertex,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadeModel {
    Flat,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontFace {
    CounterClockwise,
    Clockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
}

/// Blending a compiled shader material asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompiledBlendMode {
    #[default]
    Solid,
    Add,
    Alpha,
    Clip,
}

impl CompiledBlendMode {
    /// Whether geometry using this mode belongs in the alpha pass.
    pub fn needs_alpha_pass(self) -> bool {
        matches!(self, Self::Add | Self::Alpha)
    }
}

/// Per-vertex data a compiled material reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribKind {
    /// A UV layer.
    TexCoord,
    /// A vertex colour layer.
    Color,
    /// Tangents for normal mapping.
    Tangent,
    /// Original (undeformed) coordinates.
    Orco,
}

/// One attribute a compiled material expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttrib {
    pub kind: VertexAttribKind,
    /// Generic attribute index to feed.
    pub location: u32,
    /// Name of the mesh layer providing the data, empty for the active layer.
    pub layer: String,
}

/// Attribute layout filled in when a compiled material is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexAttribs {
    pub attribs: Vec<VertexAttrib>,
}

impl VertexAttribs {
    pub fn clear(&mut self) {
        self.attribs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.attribs.is_empty()
    }
}
