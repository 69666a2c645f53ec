//! Baseline fixed-function state.

use glam::Mat4;

use crate::backend::{
    Capability, ClientArray, CompareFunction, CullFace, FrontFace, GlBackend, MaterialParam,
    ShadeModel,
};
use crate::GpuDraw;

/// Half-tone stipple: 32 rows of 4 bytes, odd rows `0x88`, even rows `0x22`.
pub const HALFTONE_STIPPLE: [u8; 128] = {
    let mut pattern = [0u8; 128];
    let mut index = 0;
    while index < 128 {
        let row = index / 4;
        pattern[index] = if row % 2 == 1 { 0x88 } else { 0x22 };
        index += 1;
    }
    pattern
};

impl<B: GlBackend> GpuDraw<B> {
    /// Put the context into the state every draw function starts from.
    ///
    /// Call once after the context is created, and again when another
    /// renderer may have changed state behind the cache. Both caches start
    /// over, so the next face and material slot are set up in full.
    pub fn state_init(&mut self) {
        log::debug!("Initializing fixed-function state on {}", self.backend.name());

        self.disable();
        self.texture.reset();

        self.backend.material(MaterialParam::Ambient([0.0; 4]));
        self.backend.material(MaterialParam::Diffuse([0.5, 0.5, 0.5, 1.0]));
        self.backend.material(MaterialParam::Specular([0.5, 0.5, 0.5, 1.0]));
        self.backend.material(MaterialParam::Shininess(35.0));

        self.default_lights();

        self.backend.depth_func(CompareFunction::LessEqual);
        self.backend.enable(Capability::Normalize);
        self.backend.shade_model(ShadeModel::Flat);

        for cap in [
            Capability::AlphaTest,
            Capability::Blend,
            Capability::DepthTest,
            Capability::Fog,
            Capability::Lighting,
            Capability::LogicOp,
            Capability::StencilTest,
            Capability::Texture1D,
            Capability::Texture2D,
        ] {
            self.backend.disable(cap);
        }

        self.backend.enable_client_array(ClientArray::Vertex);
        self.backend.enable_client_array(ClientArray::Normal);

        self.backend.reset_pixel_transfer();
        self.backend.depth_range(0.0, 1.0);
        self.backend.polygon_stipple(&HALFTONE_STIPPLE);
        self.backend.load_texture_matrix(Mat4::IDENTITY);

        self.backend.front_face(FrontFace::CounterClockwise);
        self.backend.cull_face(CullFace::Back);
        self.backend.enable(Capability::CullFace);
    }
}
