//! Text drawn from bitmap font images.
//!
//! A face flagged [`FaceMode::BMFONT`] shows a string instead of its image:
//! every character becomes a copy of the face, with its UVs remapped into
//! the character's cell of the font image.

use facedraw_core::image::Image;
use facedraw_core::{profile_function, Face, FaceMode, ImageRegistry};
use glam::Vec3;

use crate::backend::GlBackend;
use crate::GpuDraw;

/// Placement of one character of a bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// UV the face is centred on before scaling.
    pub center: [f32; 2],
    /// Scale applied to UVs and vertex positions.
    pub size: [f32; 2],
    /// UV offset of the character cell.
    pub translate: [f32; 2],
    /// Vertex offset of the character.
    pub movement: [f32; 2],
    /// Horizontal distance to the next character.
    pub advance: f32,
}

/// Glyph lookup for images used as bitmap fonts.
pub trait BitmapFont {
    /// Metrics of `character` in `image`, `None` when the font lacks it.
    fn glyph(&self, image: &Image, character: u8) -> Option<GlyphMetrics>;
}

/// RGB of a face colour packed as `0xRRGGBBAA`.
fn vertex_color(packed: u32) -> [u8; 3] {
    let bytes = packed.to_le_bytes();
    [bytes[3], bytes[2], bytes[1]]
}

impl<B: GlBackend> GpuDraw<B> {
    /// Draw `text` with the bitmap font of `face`'s image, laid out on the
    /// face corners `corners` (3 or 4).
    ///
    /// Only draws when `mode` has [`FaceMode::BMFONT`]. UVs go to `attrib`
    /// when given, else to the texture coordinates. `colors` are per-corner
    /// packed colours; faces with [`FaceMode::OBCOL`] keep the current colour
    /// instead, and without either the text is white.
    #[allow(clippy::too_many_arguments)]
    pub fn render_text<F: BitmapFont + ?Sized>(
        &mut self,
        images: &ImageRegistry,
        font: &F,
        face: &Face,
        mode: FaceMode,
        text: &str,
        colors: Option<&[u32; 4]>,
        corners: &[Vec3],
        attrib: Option<u32>,
    ) {
        profile_function!();

        if !mode.contains(FaceMode::BMFONT) || text.is_empty() {
            return;
        }
        let Some(image) = face.image.and_then(|id| images.get(id)) else {
            return;
        };
        if !(3..=4).contains(&corners.len()) {
            log::warn!("Cannot draw text on a face with {} corners", corners.len());
            return;
        }

        let colors = if face.mode.contains(FaceMode::OBCOL) {
            None
        } else {
            if colors.is_none() {
                self.backend.color_3f([1.0, 1.0, 1.0]);
            }
            colors
        };

        self.backend.push_matrix();

        for character in text.bytes() {
            let Some(glyph) = font.glyph(image, character) else {
                log::trace!("Font {} has no glyph {:#04x}", image.name, character);
                continue;
            };

            self.backend.begin_polygon();
            for (corner, (position, uv)) in corners.iter().zip(face.uv.iter()).enumerate() {
                let uv = [
                    (uv[0] - glyph.center[0]) * glyph.size[0] + glyph.translate[0],
                    (uv[1] - glyph.center[1]) * glyph.size[1] + glyph.translate[1],
                ];
                match attrib {
                    Some(location) => self.backend.vertex_attrib_2f(location, uv),
                    None => self.backend.tex_coord(uv),
                }
                if let Some(colors) = colors {
                    self.backend.color_3ub(vertex_color(colors[corner]));
                }
                self.backend.vertex(Vec3::new(
                    glyph.size[0] * position.x + glyph.movement[0],
                    glyph.size[1] * position.y + glyph.movement[1],
                    position.z,
                ));
            }
            self.backend.end();

            self.backend.translate(Vec3::new(glyph.advance, 0.0, 0.0));
        }

        self.backend.pop_matrix();
    }
}

#[cfg(test)]
mod tests {
    use facedraw_core::{ImageBuffer, UserPreferences};

    use super::*;
    use crate::backend::{DummyBackend, GlCall};

    /// Monospace font with 16x16 cells and no `?` glyph.
    struct GridFont;

    impl BitmapFont for GridFont {
        fn glyph(&self, _image: &Image, character: u8) -> Option<GlyphMetrics> {
            if character == b'?' {
                return None;
            }
            let cell = 1.0 / 16.0;
            Some(GlyphMetrics {
                center: [0.0, 0.0],
                size: [1.0, 1.0],
                translate: [f32::from(character % 16) * cell, f32::from(character / 16) * cell],
                movement: [0.0, 0.0],
                advance: 1.0,
            })
        }
    }

    fn quad() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    fn setup() -> (GpuDraw<DummyBackend>, ImageRegistry, Face) {
        let mut images = ImageRegistry::new();
        let font = images.add(Image::new("font", ImageBuffer::solid(256, 256, [255; 4])));
        let draw = GpuDraw::new(DummyBackend::new(), UserPreferences::default());
        (draw, images, Face::textured(font).with_mode(FaceMode::BMFONT))
    }

    #[test]
    fn test_one_polygon_per_glyph() {
        let (mut draw, images, face) = setup();

        draw.render_text(&images, &GridFont, &face, face.mode, "abc", None, &quad(), None);

        let backend = draw.backend();
        assert_eq!(backend.count(|c| *c == GlCall::BeginPolygon), 3);
        assert_eq!(backend.count(|c| matches!(c, GlCall::Vertex(_))), 12);
        assert_eq!(backend.calls()[0], GlCall::Color3f([1.0, 1.0, 1.0]));
        assert_eq!(backend.calls()[1], GlCall::PushMatrix);
        assert_eq!(backend.calls().last(), Some(&GlCall::PopMatrix));
    }

    #[test]
    fn test_needs_bmfont_mode() {
        let (mut draw, images, face) = setup();

        draw.render_text(&images, &GridFont, &face, FaceMode::empty(), "abc", None, &quad(), None);

        assert!(draw.backend().calls().is_empty());
    }

    #[test]
    fn test_control_bytes_are_glyphs() {
        let (mut draw, images, face) = setup();

        draw.render_text(&images, &GridFont, &face, face.mode, "a\n\tb", None, &quad(), None);

        let backend = draw.backend();
        assert_eq!(backend.count(|c| *c == GlCall::BeginPolygon), 4);
        assert_eq!(
            backend.count(|c| *c == GlCall::Translate(Vec3::new(1.0, 0.0, 0.0))),
            4
        );
        // The newline glyph sits in row 0, column 10 of the font grid.
        let cell = 1.0 / 16.0;
        assert!(backend
            .calls()
            .contains(&GlCall::TexCoord([10.0 * cell, 0.0])));
    }

    #[test]
    fn test_missing_glyph_is_skipped() {
        let (mut draw, images, face) = setup();

        draw.render_text(&images, &GridFont, &face, face.mode, "a?b", None, &quad(), None);

        assert_eq!(draw.backend().count(|c| *c == GlCall::BeginPolygon), 2);
    }

    #[test]
    fn test_vertex_colors_and_attrib() {
        let (mut draw, images, face) = setup();
        let colors = [0x11223344, 0, 0, 0];

        draw.render_text(&images, &GridFont, &face, face.mode, "a", Some(&colors), &quad()[..3], Some(5));

        let calls = draw.backend().calls();
        assert!(calls.contains(&GlCall::Color3ub([0x11, 0x22, 0x33])));
        assert_eq!(calls.iter().filter(|c| matches!(c, GlCall::VertexAttrib2f(5, _))).count(), 3);
        assert!(!calls.iter().any(|c| matches!(c, GlCall::Color3f(_))));
    }

    #[test]
    fn test_object_color_keeps_current_color() {
        let (mut draw, images, face) = setup();
        let face = face.with_mode(FaceMode::OBCOL);
        let colors = [u32::MAX; 4];

        draw.render_text(&images, &GridFont, &face, face.mode, "a", Some(&colors), &quad(), None);

        let calls = draw.backend().calls();
        assert!(!calls.iter().any(|c| matches!(c, GlCall::Color3ub(_) | GlCall::Color3f(_))));
    }
}
