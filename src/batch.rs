// Instance records in the layout the renderer bridge expects.

use bytemuck::{Pod, Zeroable};
use tree_core::InstanceTransform;

/// One instance as eight packed floats: position, uniform scale, rotation
/// quaternion (x, y, z, w).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
}

pub const FLOATS_PER_INSTANCE: usize = std::mem::size_of::<InstanceRecord>() / 4;

impl From<&InstanceTransform> for InstanceRecord {
    fn from(t: &InstanceTransform) -> Self {
        Self {
            position: t.position.to_array(),
            scale: t.scale,
            rotation: t.rotation.to_array(),
        }
    }
}

/// Refill `out` with one record per transform and view it as raw floats.
pub fn pack<'a>(transforms: &[InstanceTransform], out: &'a mut Vec<InstanceRecord>) -> &'a [f32] {
    out.clear();
    out.extend(transforms.iter().map(InstanceRecord::from));
    bytemuck::cast_slice(out.as_slice())
}

/// Flatten per-instance colors as `[r, g, b, r, g, b, ...]`.
pub fn pack_colors(colors: impl Iterator<Item = [f32; 3]>) -> Vec<f32> {
    colors.flatten().collect()
}
