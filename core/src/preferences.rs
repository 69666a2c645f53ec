//! User preferences consumed by the draw-state cache.
//!
//! Preferences can be built in code or loaded from RON:
//!
//! ```
//! use facedraw_core::preferences::UserPreferences;
//!
//! let prefs = UserPreferences::from_ron_str("(max_texture_size: 1024, alpha_clip: 0.25)").unwrap();
//! assert_eq!(prefs.max_texture_size, 1024);
//! assert!(prefs.mipmap);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One of the three solid-view lights.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidLight {
    pub enabled: bool,
    /// Light position; `w == 0` makes it directional.
    pub position: [f32; 4],
    /// Diffuse colour.
    pub color: [f32; 4],
    /// Specular colour.
    pub specular: [f32; 4],
}

/// Preferences that shape GPU texture and light state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Largest texture side uploaded, in pixels. Zero disables the limit.
    pub max_texture_size: u32,
    /// Alpha-test threshold for alpha-blended faces. Exactly 1.0 turns the
    /// alpha test off, since some drivers misbehave at that value.
    pub alpha_clip: f32,
    /// Upload mip chains for textures.
    pub mipmap: bool,
    /// Blend between mip levels instead of picking the nearest one.
    pub linear_mipmap: bool,
    /// Solid-view lights. All disabled means "not yet initialized".
    pub solid_lights: [SolidLight; 3],
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            max_texture_size: 0,
            alpha_clip: 0.5,
            mipmap: true,
            linear_mipmap: false,
            solid_lights: [SolidLight::default(); 3],
        }
    }
}

impl UserPreferences {
    /// Parse preferences from a RON string. Missing fields take defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Load preferences from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let prefs = Self::from_ron_str(&source)?;
        log::info!("Loaded preferences from {}", path.display());
        Ok(prefs)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn with_max_texture_size(mut self, size: u32) -> Self {
        self.max_texture_size = size;
        self
    }

    pub fn with_alpha_clip(mut self, clip: f32) -> Self {
        self.alpha_clip = clip;
        self
    }

    pub fn with_mipmap(mut self, mipmap: bool, linear: bool) -> Self {
        self.mipmap = mipmap;
        self.linear_mipmap = linear;
        self
    }

    /// Whether none of the solid lights has been set up.
    pub fn solid_lights_unset(&self) -> bool {
        self.solid_lights.iter().all(|light| !light.enabled)
    }
}
