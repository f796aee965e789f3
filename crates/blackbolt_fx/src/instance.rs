//! Sprite instance data for GPU upload.

use bytemuck::{Pod, Zeroable};

/// Per-point data consumed by a point-sprite vertex shader.
///
/// Layout: 32 bytes, two 16-byte rows.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Camera-space position (x, y, z).
    pub position: [f32; 3],
    /// Alpha multiplier.
    pub alpha: f32,
    /// Vertex color (rgb).
    pub color: [f32; 3],
    /// Point size in pixels.
    pub size: f32,
}

impl SpriteInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// White sprite at `(x, y)` on the z = 0 plane.
    #[must_use]
    pub const fn white(x: f32, y: f32, alpha: f32, size: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            alpha,
            color: [1.0, 1.0, 1.0],
            size,
        }
    }

    /// Raw bytes of a slice of instances, ready for a buffer write.
    #[must_use]
    pub fn as_bytes(instances: &[Self]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}
