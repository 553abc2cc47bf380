use bytemuck::{Pod, Zeroable};

/// Per-body render data read by the JavaScript renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// `body_index` is the body's position in traversal order, which is also
/// the index into the names list the host built its meshes from.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Render radius in world units.
    pub radius: f32,
    /// Self-rotation about the local Y axis, radians.
    pub spin: f32,
    pub body_index: f32,
    /// 1.0 for the selected body, 0.0 otherwise.
    pub selected: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// The per-tick render snapshot.
pub struct SnapshotBuffer {
    pub instances: Vec<BodyInstance>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(32),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The snapshot as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(BodyInstance::FLOATS, 8);
    }

    #[test]
    fn floats_view_is_field_order() {
        let mut buf = SnapshotBuffer::new();
        buf.push(BodyInstance {
            x: 1.0,
            y: 2.0,
            z: 3.0,
            radius: 0.5,
            body_index: 4.0,
            ..Default::default()
        });
        assert_eq!(buf.instance_count(), 1);
        assert_eq!(buf.as_floats(), [1.0, 2.0, 3.0, 0.5, 0.0, 4.0, 0.0, 0.0]);
    }
}
