//! Material state cache.
//!
//! Materials are resolved once per object in
//! [`GpuDraw::begin_object`](crate::GpuDraw::begin_object) and stored in a
//! fixed buffer of slots. Drawing then switches between slots with
//! [`GpuDraw::enable_slot`](crate::GpuDraw::enable_slot), which only touches
//! GPU state when the slot actually changes.
//!
//! # Slots
//!
//! Slot numbers start at one, matching object material slots. Slot 0 holds
//! the default material for objects without any. Each slot is shaded either
//! with fixed-function colours or with a compiled shader, when the host can
//! compile one and the caller asked for [`ShadingMode::Compiled`].
//!
//! # Alpha pass
//!
//! Slots with transparency are skipped in the opaque pass and drawn in a
//! second alpha pass; `begin_object` reports whether that pass is needed.

mod slot;
mod state;

use static_assertions::const_assert;

pub use slot::{FixedColors, MaterialSlot, ShadingMode, SlotShading};
pub use state::MaterialState;

/// Highest material slot number an object can use.
pub const MAX_MATERIALS: usize = 16;

/// Number of slots in the material buffer, including default slot 0.
pub const MAX_MATERIAL_BUFFERS: usize = MAX_MATERIALS + 1;

const_assert!(MAX_MATERIAL_BUFFERS > 1);
