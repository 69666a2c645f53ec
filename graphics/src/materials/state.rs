//! Per-object material binding.

use facedraw_core::material::CompiledMaterialHandle;
use facedraw_core::{profile_function, MaterialRegistry, Object, Scene, View};
use glam::Mat4;
use static_assertions::assert_impl_all;

use super::{FixedColors, MaterialSlot, ShadingMode, SlotShading, MAX_MATERIAL_BUFFERS};
use crate::backend::{Capability, GlBackend, MaterialParam, VertexAttribs};
use crate::GpuDraw;

/// Material binding state of one GL context.
#[derive(Debug, Clone)]
pub struct MaterialState {
    slots: [MaterialSlot; MAX_MATERIAL_BUFFERS],
    total: usize,
    bound: Option<CompiledMaterialHandle>,
    object_layer: u32,
    object_matrix: Mat4,
    view_matrix: Mat4,
    view_inverse: Mat4,
    alpha_pass: bool,
    last_slot: Option<usize>,
    last_result: bool,
}

assert_impl_all!(MaterialState: Send, Sync);

impl Default for MaterialState {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialState {
    pub(crate) fn new() -> Self {
        Self {
            slots: [MaterialSlot::default(); MAX_MATERIAL_BUFFERS],
            total: 0,
            bound: None,
            object_layer: 0,
            object_matrix: Mat4::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            view_inverse: Mat4::IDENTITY,
            alpha_pass: false,
            last_slot: None,
            last_result: true,
        }
    }

    fn for_object(object: &Object, view: &View) -> Self {
        Self {
            total: object.slot_count(),
            object_layer: object.layer,
            object_matrix: Mat4::from_cols_array_2d(&object.matrix),
            view_matrix: Mat4::from_cols_array_2d(&view.view_matrix),
            view_inverse: Mat4::from_cols_array_2d(&view.view_inverse),
            alpha_pass: view.transparent_pass,
            ..Self::new()
        }
    }

    /// Contents of slot `index`.
    pub fn slot(&self, index: usize) -> Option<&MaterialSlot> {
        self.slots.get(index)
    }

    /// Number of material slots of the current object.
    pub fn slot_count(&self) -> usize {
        self.total
    }

    /// Whether the current draw is the alpha pass.
    pub fn alpha_pass(&self) -> bool {
        self.alpha_pass
    }

    /// Compiled material currently bound.
    pub fn bound(&self) -> Option<CompiledMaterialHandle> {
        self.bound
    }

    /// Slot enabled last, `None` after a disable.
    pub fn last_slot(&self) -> Option<usize> {
        self.last_slot
    }
}

impl<B: GlBackend> GpuDraw<B> {
    /// Prepare the material slots of `object` for drawing in `view`.
    ///
    /// With `track_alpha`, slots remember whether they are transparent so
    /// opaque and alpha passes draw disjoint sets. Returns whether the object
    /// has transparent slots that need a later alpha pass.
    pub fn begin_object(
        &mut self,
        materials: &mut MaterialRegistry,
        scene: &Scene,
        object: &Object,
        view: &View,
        mode: ShadingMode,
        track_alpha: bool,
    ) -> bool {
        profile_function!();

        self.unbind_compiled();
        self.material = MaterialState::for_object(object, view);
        let alpha_pass = self.material.alpha_pass;
        let mut needs_alpha_pass = false;

        if object.slot_count() == 0 {
            let colors = FixedColors::default_material(materials.default_material());
            let slot = MaterialSlot {
                shading: SlotShading::FixedFunction(colors),
                has_alpha: false,
            };
            self.material.slots[0] = slot;
            // Slot 1 too, for callers that never ask for slot 0.
            self.material.slots[1] = slot;
        }

        for index in 1..=object.slot_count() {
            if index >= MAX_MATERIAL_BUFFERS {
                log::warn!(
                    "Object {} has {} material slots, only {} are drawn",
                    object.name,
                    object.slot_count(),
                    MAX_MATERIAL_BUFFERS - 1
                );
                break;
            }

            let mut id = object.material_slot(index);
            if mode == ShadingMode::FixedFunction {
                id = materials.active_node_material(id);
            }
            let material = materials.resolve_mut(id);
            let fallback = FixedColors::from_material(material, track_alpha && alpha_pass);

            let compiled = match mode {
                ShadingMode::Compiled => match material.compiled {
                    Some(handle) => Some(handle),
                    None => {
                        let handle = self.backend.compile_material(scene, material);
                        if handle.is_none() {
                            log::debug!(
                                "Material {} has no shader, using fixed function",
                                material.name
                            );
                        }
                        material.compiled = handle;
                        handle
                    }
                },
                ShadingMode::FixedFunction => None,
            };

            let (shading, has_alpha) = match compiled {
                Some(handle) => (
                    SlotShading::Compiled { handle, fallback },
                    self.backend.compiled_blend_mode(handle).needs_alpha_pass(),
                ),
                None => (SlotShading::FixedFunction(fallback), material.has_alpha()),
            };

            let slot = &mut self.material.slots[index];
            slot.shading = shading;
            if track_alpha {
                slot.has_alpha = has_alpha;
                needs_alpha_pass |= has_alpha && !alpha_pass;
            }
        }

        self.disable();
        needs_alpha_pass
    }

    /// Switch to material slot `index`. Returns whether the slot is drawn
    /// in the current pass.
    ///
    /// With `attribs`, compiled slots bind their shader and fill in the
    /// vertex attributes it reads; without, they fall back to fixed-function
    /// colours.
    pub fn enable_slot(&mut self, index: usize, mut attribs: Option<&mut VertexAttribs>) -> bool {
        let index = index.min(self.material.total);
        if let Some(attribs) = attribs.as_mut() {
            attribs.clear();
        }

        if index >= MAX_MATERIAL_BUFFERS || self.material.last_slot == Some(index) {
            return self.material.last_result;
        }

        self.unbind_compiled();

        let slot = self.material.slots[index];
        let alpha_pass = self.material.alpha_pass;
        let drawable = alpha_pass == slot.has_alpha;
        self.material.last_slot = Some(index);
        self.material.last_result = drawable;

        if !drawable {
            return false;
        }

        match (slot.shading, attribs) {
            (SlotShading::Compiled { handle, .. }, Some(attribs)) => {
                let state = &self.material;
                self.backend.compiled_vertex_attributes(handle, attribs);
                self.backend.bind_compiled(handle, state.object_layer);
                self.backend.bind_compiled_uniforms(
                    handle,
                    state.object_matrix,
                    state.view_matrix,
                    state.view_inverse,
                );
                self.material.bound = Some(handle);
            }
            (shading, _) => {
                let colors = shading.fixed_colors();
                self.backend.material(MaterialParam::Diffuse(colors.diffuse));
                self.backend.material(MaterialParam::Specular(colors.specular));
            }
        }

        if alpha_pass {
            self.backend.enable(Capability::Blend);
        } else {
            self.backend.disable(Capability::Blend);
        }
        true
    }

    /// Forget the enabled slot and unbind any compiled material.
    pub fn disable(&mut self) {
        self.material.last_slot = None;
        self.material.last_result = true;
        self.unbind_compiled();
    }

    fn unbind_compiled(&mut self) {
        if let Some(handle) = self.material.bound.take() {
            self.backend.unbind_compiled(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use facedraw_core::Material;

    use super::*;
    use crate::backend::{CompiledBlendMode, DummyBackend, GlCall};

    fn new_draw(backend: DummyBackend) -> GpuDraw<DummyBackend> {
        GpuDraw::new(backend, facedraw_core::UserPreferences::default())
    }

    #[test]
    fn test_zero_slots_use_default_material() {
        let mut draw = new_draw(DummyBackend::new());
        let mut materials = MaterialRegistry::new();
        let scene = Scene::new();
        let object = Object::mesh("empty");

        let needs_alpha = draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::FixedFunction,
            true,
        );

        assert!(!needs_alpha);
        let state = draw.material_state();
        assert_eq!(state.slot(0), state.slot(1));
        let expected = FixedColors {
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
        };
        assert_eq!(
            state.slot(0).unwrap().shading,
            SlotShading::FixedFunction(expected)
        );

        assert!(draw.enable_slot(0, None));
        assert!(draw
            .backend()
            .calls()
            .contains(&GlCall::Material(MaterialParam::Diffuse(expected.diffuse))));
    }

    #[test]
    fn test_enable_slot_is_memoized() {
        let mut draw = new_draw(DummyBackend::new());
        let mut materials = MaterialRegistry::new();
        let red = materials.add(Material::new("red").with_color([1.0, 0.0, 0.0]));
        let scene = Scene::new();
        let object = Object::mesh("cube").with_materials(vec![Some(red)]);
        draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::FixedFunction,
            false,
        );

        assert!(draw.enable_slot(1, None));
        let after_first = draw.backend().calls().len();
        assert!(draw.enable_slot(1, None));
        assert_eq!(draw.backend().calls().len(), after_first);
    }

    #[test]
    fn test_index_clamped_to_slot_count() {
        let mut draw = new_draw(DummyBackend::new());
        let mut materials = MaterialRegistry::new();
        let red = materials.add(Material::new("red"));
        let scene = Scene::new();
        let object = Object::mesh("cube").with_materials(vec![Some(red)]);
        draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::FixedFunction,
            false,
        );

        draw.enable_slot(9, None);
        assert_eq!(draw.material_state().last_slot(), Some(1));
    }

    #[test]
    fn test_alpha_slots_wait_for_alpha_pass() {
        let mut draw = new_draw(DummyBackend::new());
        let mut materials = MaterialRegistry::new();
        let solid = materials.add(Material::new("solid"));
        let glass = materials.add(Material::new("glass").with_alpha(0.4));
        let scene = Scene::new();
        let object = Object::mesh("window").with_materials(vec![Some(solid), Some(glass)]);

        let needs_alpha = draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::FixedFunction,
            true,
        );
        assert!(needs_alpha);
        assert!(draw.enable_slot(1, None));
        assert!(!draw.enable_slot(2, None));

        let needs_alpha = draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default().alpha_pass(),
            ShadingMode::FixedFunction,
            true,
        );
        assert!(!needs_alpha);
        assert!(!draw.enable_slot(1, None));
        assert!(draw.enable_slot(2, None));
        assert_eq!(
            draw.material_state().slot(2).unwrap().shading.fixed_colors().diffuse[3],
            0.4
        );
        assert_eq!(
            draw.backend().calls().last(),
            Some(&GlCall::Enable(Capability::Blend))
        );
    }

    #[test]
    fn test_node_material_redirect() {
        let mut draw = new_draw(DummyBackend::new());
        let mut materials = MaterialRegistry::new();
        let shown = materials.add(Material::new("shown").shadeless().with_color([0.0, 1.0, 0.0]));
        let owner = materials.add(Material::new("owner").with_nodes(Some(shown)));
        let scene = Scene::new();
        let object = Object::mesh("cube").with_materials(vec![Some(owner)]);

        draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::FixedFunction,
            false,
        );

        let colors = draw.material_state().slot(1).unwrap().shading.fixed_colors();
        assert_eq!(colors.diffuse, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_compiled_slot_binds_with_attribs() {
        let backend = DummyBackend::new().with_shader_material("skin", CompiledBlendMode::Solid);
        let mut draw = new_draw(backend);
        let mut materials = MaterialRegistry::new();
        let skin = materials.add(Material::new("skin"));
        let scene = Scene::new();
        let object = Object::mesh("head").with_materials(vec![Some(skin)]).with_layer(4);

        draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::Compiled,
            true,
        );
        let handle = materials.get(skin).unwrap().compiled.expect("compiled");

        let mut attribs = VertexAttribs::default();
        assert!(draw.enable_slot(1, Some(&mut attribs)));
        assert!(!attribs.is_empty());
        assert_eq!(draw.material_state().bound(), Some(handle));
        assert!(draw
            .backend()
            .calls()
            .contains(&GlCall::BindCompiled(handle, 4)));

        draw.disable();
        assert_eq!(draw.material_state().bound(), None);
        assert_eq!(
            draw.backend().calls().last(),
            Some(&GlCall::UnbindCompiled(handle))
        );
    }

    #[test]
    fn test_compiled_slot_without_attribs_uses_fallback() {
        let backend = DummyBackend::new().with_shader_material("skin", CompiledBlendMode::Solid);
        let mut draw = new_draw(backend);
        let mut materials = MaterialRegistry::new();
        let skin = materials.add(Material::new("skin"));
        let scene = Scene::new();
        let object = Object::mesh("head").with_materials(vec![Some(skin)]);

        draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::Compiled,
            false,
        );

        assert!(draw.enable_slot(1, None));
        assert_eq!(draw.material_state().bound(), None);
        assert!(draw
            .backend()
            .calls()
            .iter()
            .any(|c| matches!(c, GlCall::Material(MaterialParam::Diffuse(_)))));
    }

    #[test]
    fn test_compiled_blend_mode_sets_alpha() {
        let backend = DummyBackend::new().with_shader_material("smoke", CompiledBlendMode::Add);
        let mut draw = new_draw(backend);
        let mut materials = MaterialRegistry::new();
        let smoke = materials.add(Material::new("smoke"));
        let scene = Scene::new();
        let object = Object::mesh("puff").with_materials(vec![Some(smoke)]);

        let needs_alpha = draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::Compiled,
            true,
        );

        assert!(needs_alpha);
        assert!(draw.material_state().slot(1).unwrap().has_alpha);
    }

    #[test]
    fn test_shader_compiled_once() {
        let backend = DummyBackend::new().with_shader_material("skin", CompiledBlendMode::Solid);
        let mut draw = new_draw(backend);
        let mut materials = MaterialRegistry::new();
        let skin = materials.add(Material::new("skin"));
        let scene = Scene::new();
        let object = Object::mesh("head").with_materials(vec![Some(skin)]);

        for _ in 0..3 {
            draw.begin_object(
                &mut materials,
                &scene,
                &object,
                &View::default(),
                ShadingMode::Compiled,
                false,
            );
        }

        let compiles = draw
            .backend()
            .count(|c| matches!(c, GlCall::CompileMaterial(_)));
        assert_eq!(compiles, 1);
    }

    #[test]
    fn test_begin_object_unbinds_previous_shader() {
        let backend = DummyBackend::new().with_shader_material("skin", CompiledBlendMode::Solid);
        let mut draw = new_draw(backend);
        let mut materials = MaterialRegistry::new();
        let skin = materials.add(Material::new("skin"));
        let scene = Scene::new();
        let object = Object::mesh("head").with_materials(vec![Some(skin)]);
        let view = View::default();

        draw.begin_object(&mut materials, &scene, &object, &view, ShadingMode::Compiled, false);
        let mut attribs = VertexAttribs::default();
        draw.enable_slot(1, Some(&mut attribs));
        let handle = draw.material_state().bound().unwrap();
        draw.backend_mut().clear_calls();

        draw.begin_object(&mut materials, &scene, &object, &view, ShadingMode::Compiled, false);

        assert_eq!(draw.backend().calls().first(), Some(&GlCall::UnbindCompiled(handle)));
        assert_eq!(draw.material_state().bound(), None);
    }

    #[test]
    fn test_slots_beyond_buffer_are_skipped() {
        let mut draw = new_draw(DummyBackend::new());
        let mut materials = MaterialRegistry::new();
        let id = materials.add(Material::new("tile"));
        let scene = Scene::new();
        let object = Object::mesh("mosaic").with_materials(vec![Some(id); 20]);

        draw.begin_object(
            &mut materials,
            &scene,
            &object,
            &View::default(),
            ShadingMode::FixedFunction,
            false,
        );
        assert!(draw.enable_slot(16, None));
        let result = draw.enable_slot(18, None);

        assert!(result);
        assert_eq!(draw.material_state().last_slot(), Some(16));
    }
}
