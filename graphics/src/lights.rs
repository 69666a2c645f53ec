//! Fixed-function lights: the solid-view preset lights and scene lamps.

use facedraw_core::{profile_function, LampKind, Object, Scene, SolidLight};
use glam::{Mat4, Vec4Swizzles};

use crate::backend::{Capability, GlBackend, LightParam};
use crate::GpuDraw;

/// Number of fixed-function lights.
pub const MAX_LIGHTS: u32 = 8;

/// Lights installed the first time the solid-view lights are used.
fn preset_solid_lights() -> [SolidLight; 3] {
    [
        SolidLight {
            enabled: true,
            position: [-0.3, 0.3, 0.9, 0.0],
            color: [0.8, 0.8, 0.8, 0.0],
            specular: [0.5, 0.5, 0.5, 1.0],
        },
        SolidLight {
            enabled: false,
            position: [0.5, 0.5, 0.1, 0.0],
            color: [0.4, 0.4, 0.8, 0.0],
            specular: [0.3, 0.3, 0.5, 1.0],
        },
        SolidLight {
            enabled: false,
            position: [0.3, -0.3, -0.2, 0.0],
            color: [0.8, 0.5, 0.4, 0.0],
            specular: [0.5, 0.4, 0.3, 1.0],
        },
    ]
}

impl<B: GlBackend> GpuDraw<B> {
    /// Set up the three solid-view lights from the preferences.
    ///
    /// Installs the preset lights when none is enabled yet. Returns the
    /// number of enabled lights.
    pub fn default_lights(&mut self) -> u32 {
        if self.prefs.solid_lights_unset() {
            log::debug!("Installing preset solid lights");
            self.prefs.solid_lights = preset_solid_lights();
        }

        let lights = self.prefs.solid_lights;
        for (index, light) in (0..).zip(lights.iter()) {
            self.backend.light(index, LightParam::Position(light.position));
            self.backend.light(index, LightParam::Diffuse(light.color));
            self.backend.light(index, LightParam::Specular(light.specular));
        }

        let mut count = 0;
        for index in 0..MAX_LIGHTS {
            match lights.get(index as usize) {
                Some(light) => {
                    if light.enabled {
                        self.backend.enable(Capability::Light(index));
                        count += 1;
                    } else {
                        self.backend.disable(Capability::Light(index));
                    }
                    // Lamps drawn earlier may have left these behind.
                    self.backend.light(index, LightParam::SpotCutoff(180.0));
                    self.backend.light(index, LightParam::ConstantAttenuation(1.0));
                    self.backend.light(index, LightParam::LinearAttenuation(0.0));
                }
                None => self.backend.disable(Capability::Light(index)),
            }
        }

        self.backend.disable(Capability::Lighting);
        self.backend.disable(Capability::ColorMaterial);
        count
    }

    /// Light `object` with the lamps of `scene` visible in `layer`.
    ///
    /// Lamps must share a layer with both `layer` and the object. Positions
    /// are given under `view_matrix`. Returns the number of lights set, at
    /// most [`MAX_LIGHTS`].
    pub fn scene_lights(
        &mut self,
        scene: &Scene,
        object: &Object,
        layer: u32,
        view_matrix: Mat4,
    ) -> u32 {
        profile_function!();

        for index in 0..MAX_LIGHTS {
            self.backend.disable(Capability::Light(index));
        }

        let lamps = scene.placed_objects().filter_map(|(base, lamp_object)| {
            let lamp = lamp_object.lamp_data()?;
            (base.layer & layer != 0 && base.layer & object.layer != 0)
                .then_some((lamp_object, lamp))
        });

        let mut count = 0;
        for (lamp_object, lamp) in lamps.take(MAX_LIGHTS as usize) {
            let index = count;
            let matrix = Mat4::from_cols_array_2d(&lamp_object.matrix);

            self.backend.push_matrix();
            self.backend.load_matrix(view_matrix);

            if lamp.kind == LampKind::Sun {
                let direction = matrix.z_axis.xyz();
                self.backend.light(
                    index,
                    LightParam::Position([direction.x, direction.y, direction.z, 0.0]),
                );
            } else {
                let position = matrix.w_axis.xyz();
                self.backend.light(
                    index,
                    LightParam::Position([position.x, position.y, position.z, 1.0]),
                );
                self.backend.light(index, LightParam::ConstantAttenuation(1.0));
                self.backend.light(
                    index,
                    LightParam::LinearAttenuation(lamp.att1 / lamp.distance),
                );
                self.backend.light(
                    index,
                    LightParam::QuadraticAttenuation(lamp.att2 / (lamp.distance * lamp.distance)),
                );

                if lamp.kind == LampKind::Spot {
                    let direction = -matrix.z_axis.xyz();
                    self.backend
                        .light(index, LightParam::SpotDirection(direction.to_array()));
                    self.backend
                        .light(index, LightParam::SpotCutoff(lamp.spot_size / 2.0));
                    self.backend
                        .light(index, LightParam::SpotExponent(128.0 * lamp.spot_blend));
                } else {
                    self.backend.light(index, LightParam::SpotCutoff(180.0));
                }
            }

            let energy = [
                lamp.energy * lamp.color[0],
                lamp.energy * lamp.color[1],
                lamp.energy * lamp.color[2],
                1.0,
            ];
            self.backend.light(index, LightParam::Diffuse(energy));
            self.backend.light(index, LightParam::Specular(energy));
            self.backend.enable(Capability::Light(index));

            self.backend.pop_matrix();
            count += 1;
        }

        log::trace!("Lit {} with {} lamps", object.name, count);
        count
    }
}
