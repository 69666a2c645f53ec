//! Dummy GL backend for testing and development.
//!
//! This backend doesn't perform actual GPU operations. It records every call
//! in order so tests can assert exactly which state changes and uploads the
//! caches issued, and it keeps just enough state (texture names, unpack
//! parameters, compiled materials) to answer queries consistently.

use std::collections::{HashMap, HashSet};

use facedraw_core::image::{GpuTextureHandle, TextureName};
use facedraw_core::material::{CompiledMaterialHandle, Material};
use facedraw_core::scene::Scene;
use glam::{Mat4, Vec3};

use super::{
    BackendError, BackendResult, BlendFactor, Capability, ClientArray, CompareFunction,
    CompiledBlendMode, CullFace, FrontFace, GlBackend, LightParam, MaterialParam, PixelUnpack,
    ShadeModel, TextureFilter, TextureWrap, VertexAttrib, VertexAttribKind, VertexAttribs,
};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    Enable(Capability),
    Disable(Capability),
    BlendFunc(BlendFactor, BlendFactor),
    AlphaFunc(CompareFunction, f32),
    DepthFunc(CompareFunction),
    SphereMapTexGen,
    LoadTextureMatrix(Mat4),
    PushMatrix,
    LoadMatrix(Mat4),
    Translate(Vec3),
    PopMatrix,
    GenTexture(TextureName),
    DeleteTextures(Vec<TextureName>),
    BindTexture(TextureName),
    TexImage2D {
        level: u32,
        width: u32,
        height: u32,
        bytes: usize,
    },
    TexSubImage2D {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        unpack: PixelUnpack,
    },
    TextureFilter(TextureFilter, TextureFilter),
    TextureWrap(TextureWrap, TextureWrap),
    TextureEnvModulate,
    SetPixelUnpack(PixelUnpack),
    Material(MaterialParam),
    Light(u32, LightParam),
    BeginPolygon,
    TexCoord([f32; 2]),
    VertexAttrib2f(u32, [f32; 2]),
    Color3ub([u8; 3]),
    Color3f([f32; 3]),
    Vertex(Vec3),
    End,
    ShadeModel(ShadeModel),
    EnableClientArray(ClientArray),
    ResetPixelTransfer,
    DepthRange(f32, f32),
    PolygonStipple(Vec<u8>),
    FrontFace(FrontFace),
    CullFace(CullFace),
    CompileMaterial(String),
    BindCompiled(CompiledMaterialHandle, u32),
    BindCompiledUniforms(CompiledMaterialHandle),
    UnbindCompiled(CompiledMaterialHandle),
    FreeGpuTexture(GpuTextureHandle),
}

/// Dummy GL backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    calls: Vec<GlCall>,
    next_name: u32,
    live_textures: HashSet<TextureName>,
    unpack: PixelUnpack,
    shader_materials: HashMap<String, CompiledBlendMode>,
    compiled: HashMap<CompiledMaterialHandle, CompiledBlendMode>,
    next_compiled: u64,
    fail_texture_creation: bool,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Let materials named `name` compile to a shader with `mode` blending.
    ///
    /// Materials not registered here fail to compile, like on a host without
    /// a shader path.
    pub fn with_shader_material(mut self, name: &str, mode: CompiledBlendMode) -> Self {
        self.shader_materials.insert(name.to_string(), mode);
        self
    }

    /// Make every following [`gen_texture`](GlBackend::gen_texture) fail.
    pub fn set_fail_texture_creation(&mut self, fail: bool) {
        self.fail_texture_creation = fail;
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<GlCall> {
        std::mem::take(&mut self.calls)
    }

    /// Forget the recorded calls, keeping backend state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Number of base-level texture uploads recorded.
    pub fn texture_uploads(&self) -> usize {
        self.count(|call| matches!(call, GlCall::TexImage2D { level: 0, .. }))
    }

    /// Size of every base-level texture upload recorded, in order.
    pub fn uploaded_sizes(&self) -> Vec<(u32, u32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GlCall::TexImage2D {
                    level: 0,
                    width,
                    height,
                    ..
                } => Some((*width, *height)),
                _ => None,
            })
            .collect()
    }

    /// Texture names generated and not yet deleted.
    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    fn record(&mut self, call: GlCall) {
        log::trace!("DummyBackend: {:?}", call);
        self.calls.push(call);
    }
}

impl GlBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn enable(&mut self, cap: Capability) {
        self.record(GlCall::Enable(cap));
    }

    fn disable(&mut self, cap: Capability) {
        self.record(GlCall::Disable(cap));
    }

    fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.record(GlCall::BlendFunc(src, dst));
    }

    fn alpha_func(&mut self, func: CompareFunction, reference: f32) {
        self.record(GlCall::AlphaFunc(func, reference));
    }

    fn depth_func(&mut self, func: CompareFunction) {
        self.record(GlCall::DepthFunc(func));
    }

    fn sphere_map_texgen(&mut self) {
        self.record(GlCall::SphereMapTexGen);
    }

    fn load_texture_matrix(&mut self, matrix: Mat4) {
        self.record(GlCall::LoadTextureMatrix(matrix));
    }

    fn push_matrix(&mut self) {
        self.record(GlCall::PushMatrix);
    }

    fn load_matrix(&mut self, matrix: Mat4) {
        self.record(GlCall::LoadMatrix(matrix));
    }

    fn translate(&mut self, offset: Vec3) {
        self.record(GlCall::Translate(offset));
    }

    fn pop_matrix(&mut self) {
        self.record(GlCall::PopMatrix);
    }

    fn gen_texture(&mut self) -> BackendResult<TextureName> {
        if self.fail_texture_creation {
            return Err(BackendError::TextureCreationFailed(
                "dummy backend told to fail".to_string(),
            ));
        }
        self.next_name += 1;
        let name = TextureName(self.next_name);
        self.live_textures.insert(name);
        self.record(GlCall::GenTexture(name));
        Ok(name)
    }

    fn delete_textures(&mut self, names: &[TextureName]) {
        for name in names {
            self.live_textures.remove(name);
        }
        self.record(GlCall::DeleteTextures(names.to_vec()));
    }

    fn bind_texture(&mut self, name: TextureName) {
        self.record(GlCall::BindTexture(name));
    }

    fn tex_image_2d(&mut self, level: u32, width: u32, height: u32, pixels: &[u8]) {
        self.record(GlCall::TexImage2D {
            level,
            width,
            height,
            bytes: pixels.len(),
        });
    }

    fn tex_sub_image_2d(&mut self, x: u32, y: u32, width: u32, height: u32, _pixels: &[u8]) {
        let unpack = self.unpack;
        self.record(GlCall::TexSubImage2D {
            x,
            y,
            width,
            height,
            unpack,
        });
    }

    fn texture_filter(&mut self, min: TextureFilter, mag: TextureFilter) {
        self.record(GlCall::TextureFilter(min, mag));
    }

    fn texture_wrap(&mut self, s: TextureWrap, t: TextureWrap) {
        self.record(GlCall::TextureWrap(s, t));
    }

    fn texture_env_modulate(&mut self) {
        self.record(GlCall::TextureEnvModulate);
    }

    fn pixel_unpack(&self) -> PixelUnpack {
        self.unpack
    }

    fn set_pixel_unpack(&mut self, unpack: PixelUnpack) {
        self.unpack = unpack;
        self.record(GlCall::SetPixelUnpack(unpack));
    }

    fn material(&mut self, param: MaterialParam) {
        self.record(GlCall::Material(param));
    }

    fn light(&mut self, index: u32, param: LightParam) {
        self.record(GlCall::Light(index, param));
    }

    fn begin_polygon(&mut self) {
        self.record(GlCall::BeginPolygon);
    }

    fn tex_coord(&mut self, uv: [f32; 2]) {
        self.record(GlCall::TexCoord(uv));
    }

    fn vertex_attrib_2f(&mut self, location: u32, uv: [f32; 2]) {
        self.record(GlCall::VertexAttrib2f(location, uv));
    }

    fn color_3ub(&mut self, rgb: [u8; 3]) {
        self.record(GlCall::Color3ub(rgb));
    }

    fn color_3f(&mut self, rgb: [f32; 3]) {
        self.record(GlCall::Color3f(rgb));
    }

    fn vertex(&mut self, position: Vec3) {
        self.record(GlCall::Vertex(position));
    }

    fn end(&mut self) {
        self.record(GlCall::End);
    }

    fn shade_model(&mut self, model: ShadeModel) {
        self.record(GlCall::ShadeModel(model));
    }

    fn enable_client_array(&mut self, array: ClientArray) {
        self.record(GlCall::EnableClientArray(array));
    }

    fn reset_pixel_transfer(&mut self) {
        self.record(GlCall::ResetPixelTransfer);
    }

    fn depth_range(&mut self, near: f32, far: f32) {
        self.record(GlCall::DepthRange(near, far));
    }

    fn polygon_stipple(&mut self, pattern: &[u8; 128]) {
        self.record(GlCall::PolygonStipple(pattern.to_vec()));
    }

    fn front_face(&mut self, face: FrontFace) {
        self.record(GlCall::FrontFace(face));
    }

    fn cull_face(&mut self, face: CullFace) {
        self.record(GlCall::CullFace(face));
    }

    fn compile_material(
        &mut self,
        _scene: &Scene,
        material: &Material,
    ) -> Option<CompiledMaterialHandle> {
        self.record(GlCall::CompileMaterial(material.name.clone()));
        let mode = *self.shader_materials.get(&material.name)?;
        self.next_compiled += 1;
        let handle = CompiledMaterialHandle(self.next_compiled);
        self.compiled.insert(handle, mode);
        Some(handle)
    }

    fn compiled_blend_mode(&self, handle: CompiledMaterialHandle) -> CompiledBlendMode {
        self.compiled.get(&handle).copied().unwrap_or_default()
    }

    fn compiled_vertex_attributes(
        &self,
        _handle: CompiledMaterialHandle,
        attribs: &mut VertexAttribs,
    ) {
        attribs.attribs.push(VertexAttrib {
            kind: VertexAttribKind::TexCoord,
            location: 1,
            layer: String::new(),
        });
    }

    fn bind_compiled(&mut self, handle: CompiledMaterialHandle, layer: u32) {
        self.record(GlCall::BindCompiled(handle, layer));
    }

    fn bind_compiled_uniforms(
        &mut self,
        handle: CompiledMaterialHandle,
        _object: Mat4,
        _view: Mat4,
        _view_inverse: Mat4,
    ) {
        self.record(GlCall::BindCompiledUniforms(handle));
    }

    fn unbind_compiled(&mut self, handle: CompiledMaterialHandle) {
        self.record(GlCall::UnbindCompiled(handle));
    }

    fn free_gpu_texture(&mut self, handle: GpuTextureHandle) {
        self.record(GlCall::FreeGpuTexture(handle));
    }
}
