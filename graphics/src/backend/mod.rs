//! GL backend abstraction layer.
//!
//! The state caches never talk to a driver directly. They issue calls through
//! [`GlBackend`], which the host implements on top of whatever binding owns
//! the current GL context.
//!
//! # Available Backends
//!
//! - [`DummyBackend`]: records every call without touching a GPU. Used for
//!   testing and for headless runs.
//!
//! # Architecture
//!
//! The trait mirrors the slice of the fixed-function API the caches need:
//! - Capability toggles, blend and alpha-test functions
//! - Texture names, uploads and sampling parameters
//! - Fixed-function materials and lights
//! - Immediate-mode polygons for bitmap text
//! - Compiled shader materials, for hosts with a shader path

pub mod dummy;
mod error;
mod types;

use facedraw_core::image::{GpuTextureHandle, TextureName};
use facedraw_core::material::{CompiledMaterialHandle, Material};
use facedraw_core::scene::Scene;
use glam::{Mat4, Vec3};

pub use dummy::{DummyBackend, GlCall};
pub use error::{BackendError, BackendResult};
pub use types::{
    BlendFactor, Capability, ClientArray, CompareFunction, CompiledBlendMode, CullFace,
    FrontFace, LightParam, MaterialParam, PixelUnpack, ShadeModel, TextureFilter, TextureWrap,
    VertexAttrib, VertexAttribKind, VertexAttribs,
};

/// Interface to the fixed-function graphics API of the current context.
///
/// Every call targets the one context current on the calling thread.
pub trait GlBackend {
    /// Backend name, for logging.
    fn name(&self) -> &'static str;

    // Capabilities and fixed functions

    fn enable(&mut self, cap: Capability);
    fn disable(&mut self, cap: Capability);
    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor);
    fn alpha_func(&mut self, func: CompareFunction, reference: f32);
    fn depth_func(&mut self, func: CompareFunction);

    /// Generate S and T texture coordinates with sphere mapping.
    fn sphere_map_texgen(&mut self);

    // Matrices

    /// Replace the texture matrix.
    fn load_texture_matrix(&mut self, matrix: Mat4);
    /// Push the modelview matrix.
    fn push_matrix(&mut self);
    /// Replace the modelview matrix.
    fn load_matrix(&mut self, matrix: Mat4);
    /// Multiply the modelview matrix by a translation.
    fn translate(&mut self, offset: Vec3);
    /// Pop the modelview matrix.
    fn pop_matrix(&mut self);

    // Textures

    /// Allocate a texture name.
    fn gen_texture(&mut self) -> BackendResult<TextureName>;
    fn delete_textures(&mut self, names: &[TextureName]);
    fn bind_texture(&mut self, name: TextureName);
    /// Upload one level of the bound 2D texture as tightly packed RGBA8.
    fn tex_image_2d(&mut self, level: u32, width: u32, height: u32, pixels: &[u8]);
    /// Replace a rectangle of level 0 of the bound texture.
    ///
    /// `pixels` is read according to the current [`PixelUnpack`] state.
    fn tex_sub_image_2d(&mut self, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]);
    fn texture_filter(&mut self, min: TextureFilter, mag: TextureFilter);
    fn texture_wrap(&mut self, s: TextureWrap, t: TextureWrap);
    /// Multiply texture colour with the vertex colour.
    fn texture_env_modulate(&mut self);
    fn pixel_unpack(&self) -> PixelUnpack;
    fn set_pixel_unpack(&mut self, unpack: PixelUnpack);

    // Fixed-function shading

    fn material(&mut self, param: MaterialParam);
    fn light(&mut self, index: u32, param: LightParam);

    // Immediate mode

    fn begin_polygon(&mut self);
    fn tex_coord(&mut self, uv: [f32; 2]);
    fn vertex_attrib_2f(&mut self, location: u32, uv: [f32; 2]);
    fn color_3ub(&mut self, rgb: [u8; 3]);
    fn color_3f(&mut self, rgb: [f32; 3]);
    fn vertex(&mut self, position: Vec3);
    fn end(&mut self);

    // Baseline state

    fn shade_model(&mut self, model: ShadeModel);
    fn enable_client_array(&mut self, array: ClientArray);
    /// Reset colour mapping, scales and biases of the pixel transfer stage.
    fn reset_pixel_transfer(&mut self);
    fn depth_range(&mut self, near: f32, far: f32);
    /// Set the 32x32 bit polygon stipple pattern.
    fn polygon_stipple(&mut self, pattern: &[u8; 128]);
    fn front_face(&mut self, face: FrontFace);
    fn cull_face(&mut self, face: CullFace);

    // Compiled shader materials

    /// Build a shader for `material`. `None` means the host has no shader
    /// path for it and the fixed-function colours are used instead.
    fn compile_material(&mut self, scene: &Scene, material: &Material)
        -> Option<CompiledMaterialHandle>;
    fn compiled_blend_mode(&self, handle: CompiledMaterialHandle) -> CompiledBlendMode;
    /// Describe the per-vertex data `handle` reads.
    fn compiled_vertex_attributes(&self, handle: CompiledMaterialHandle, attribs: &mut VertexAttribs);
    fn bind_compiled(&mut self, handle: CompiledMaterialHandle, layer: u32);
    fn bind_compiled_uniforms(
        &mut self,
        handle: CompiledMaterialHandle,
        object: Mat4,
        view: Mat4,
        view_inverse: Mat4,
    );
    fn unbind_compiled(&mut self, handle: CompiledMaterialHandle);
    /// Release a texture owned by the shader path.
    fn free_gpu_texture(&mut self, handle: GpuTextureHandle);
}
