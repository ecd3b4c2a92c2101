//! Per-layer animation drivers.
//!
//! Every frame each driver moves its instances a fraction of the way toward
//! the destination implied by the scene mode, applies the layer's idle motion
//! policy, and hands the resulting transforms to a [`RenderSink`] in one batch.

use crate::camera::Camera;
use crate::constants::{
    FOCUS_DISTANCE, FOCUS_RATE, FOCUS_SCALE, HOVER_SCALE_BOOST, PHOTO_FOCUS_DAMPING, REFERENCE_FPS,
};
use crate::intro::RevealState;
use crate::layer::{IdleMotion, Instance, Layer, LayerKind, LayerSpec};
use crate::scene::SceneMode;
use glam::{EulerRot, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Uniform {
    Time(f32),
    RevealHeight(f32),
    Brightness(f32),
}

/// What the core needs from the renderer.
pub trait RenderSink {
    /// Transforms for a whole layer; slot `i` belongs to instance `i`.
    fn set_instances(&mut self, layer: LayerKind, transforms: &[InstanceTransform]);
    fn set_uniform(&mut self, layer: LayerKind, uniform: Uniform);
    /// Rotation of the group that holds every layer.
    fn set_scene_rotation(&mut self, rotation: Quat);
}

/// Everything a driver reads in one tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub mode: SceneMode,
    /// Seconds since the session started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
    pub reveal: RevealState,
    pub camera: &'a Camera,
    /// Current rotation of the scene group, used to express view-relative
    /// targets in layer space.
    pub scene_rotation: Quat,
    pub photo_rotation: Vec2,
    pub selected_photo: Option<usize>,
    pub hovered_photo: Option<usize>,
}

/// Interpolation factor for a per-reference-frame `rate` over `dt` seconds,
/// so motion speed does not depend on the display refresh rate.
#[inline]
pub fn frame_alpha(rate: f32, dt: f32) -> f32 {
    let rate = rate.clamp(0.0, 1.0);
    1.0 - (1.0 - rate).powf(dt.max(0.0) * REFERENCE_FPS)
}

pub struct LayerDriver {
    layer: Layer,
    scratch: Vec<InstanceTransform>,
}

impl LayerDriver {
    pub fn new(layer: Layer) -> Self {
        let scratch = vec![InstanceTransform::default(); layer.len()];
        Self { layer, scratch }
    }

    pub fn kind(&self) -> LayerKind {
        self.layer.kind
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Transforms written on the last tick.
    pub fn last_transforms(&self) -> &[InstanceTransform] {
        &self.scratch
    }

    pub fn tick(&mut self, input: &FrameInput, sink: &mut dyn RenderSink) {
        let kind = self.layer.kind;
        let spec = self.layer.spec;

        sink.set_uniform(kind, Uniform::Time(input.time));
        if spec.reveal_gated {
            sink.set_uniform(kind, Uniform::RevealHeight(input.reveal.height));
            sink.set_uniform(kind, Uniform::Brightness(input.reveal.brightness));
        }

        let (focused, hovered) = if spec.focusable {
            (input.selected_photo, input.hovered_photo)
        } else {
            (None, None)
        };

        self.scratch.resize(self.layer.len(), InstanceTransform::default());
        for (slot, inst) in self.scratch.iter_mut().zip(self.layer.instances.iter_mut()) {
            if focused == Some(inst.index()) {
                step_focused(inst, input);
            } else {
                step_instance(inst, &spec, input);
            }

            let mut scale = inst.scale;
            if spec.reveal_gated {
                scale *= input.reveal.visibility(inst.position.y);
            }
            if hovered == Some(inst.index()) {
                scale *= HOVER_SCALE_BOOST;
            }
            *slot = InstanceTransform {
                position: inst.position,
                rotation: inst.rotation,
                scale,
            };
        }
        sink.set_instances(kind, &self.scratch);
    }
}

fn step_instance(inst: &mut Instance, spec: &LayerSpec, input: &FrameInput) {
    let destination = match input.mode {
        SceneMode::Order => inst.order_target(),
        SceneMode::PhotoFocus => inst.chaos_target() * spec.push_back,
        SceneMode::Chaos | SceneMode::Forming => inst.chaos_target(),
    };

    let mut rate = spec.lerp_rate;
    if spec.weighted {
        rate /= inst.weight.max(0.1);
    }
    let damping = match input.mode {
        SceneMode::PhotoFocus => PHOTO_FOCUS_DAMPING,
        _ => 1.0,
    };
    rate *= damping;
    let alpha = frame_alpha(rate, input.dt);
    inst.position = inst.position.lerp(destination, alpha);

    if input.mode == SceneMode::Order {
        apply_idle(inst, spec, input, alpha);
        return;
    }

    let spin = spec.chaos_spin * damping * input.dt;
    if spin != 0.0 {
        inst.rotation = (Quat::from_axis_angle(inst.spin_axis, spin) * inst.rotation).normalize();
    }
    inst.scale += (spec.base_scale - inst.scale) * alpha;
}

fn apply_idle(inst: &mut Instance, spec: &LayerSpec, input: &FrameInput, alpha: f32) {
    let heading = outward_heading(inst.order_target());
    let lean = Quat::from_rotation_x(inst.tilt);
    let t = input.time + inst.phase;
    let base = spec.base_scale;

    let (facing, scale) = match spec.idle {
        IdleMotion::Still => (None, base),
        IdleMotion::Breathe { amplitude, speed } => {
            (Some(heading * lean), base * (1.0 + amplitude * (t * speed).sin()))
        }
        IdleMotion::Sway { amplitude, speed } => {
            let rock = Quat::from_rotation_z(amplitude * (t * speed).sin());
            (Some(heading * rock * lean), base)
        }
        IdleMotion::FaceOutward => (Some(heading * lean), base),
        IdleMotion::Spin { speed } => {
            inst.rotation = (Quat::from_rotation_y(speed * input.dt) * inst.rotation).normalize();
            (None, base)
        }
        IdleMotion::Twinkle { speed } => {
            let glow = 0.5 + 0.5 * (t * speed).sin();
            (None, base * (0.6 + 0.4 * glow))
        }
    };

    if let Some(target) = facing {
        inst.rotation = inst.rotation.slerp(target, alpha).normalize();
    }
    inst.scale += (scale - inst.scale) * alpha;
}

/// Rotation about Y that points local +Z away from the trunk.
fn outward_heading(p: Vec3) -> Quat {
    if p.x.abs() < 1e-6 && p.z.abs() < 1e-6 {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(p.x.atan2(p.z))
}

/// Pull the selected card to a fixed spot in front of the camera, facing it,
/// with the user's spin on top. Recomputed every frame since the view and the
/// scene group can both move.
fn step_focused(inst: &mut Instance, input: &FrameInput) {
    let camera = input.camera;
    let to_layer = input.scene_rotation.inverse();

    let world_target = camera.eye + camera.forward() * FOCUS_DISTANCE;
    let spin = Quat::from_euler(
        EulerRot::YXZ,
        input.photo_rotation.y,
        input.photo_rotation.x,
        0.0,
    );
    let facing = (to_layer * camera.orientation * spin).normalize();

    let alpha = frame_alpha(FOCUS_RATE, input.dt);
    inst.position = inst.position.lerp(to_layer * world_target, alpha);
    inst.rotation = inst.rotation.slerp(facing, alpha).normalize();
    inst.scale += (FOCUS_SCALE - inst.scale) * alpha;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_alpha_matches_rate_at_reference_fps() {
        let a = frame_alpha(0.1, 1.0 / REFERENCE_FPS);
        assert!((a - 0.1).abs() < 1e-5);
    }

    #[test]
    fn frame_alpha_is_zero_without_time() {
        assert_eq!(frame_alpha(0.5, 0.0), 0.0);
    }

    #[test]
    fn outward_heading_faces_away_from_trunk() {
        let q = outward_heading(Vec3::new(3.0, 1.0, 0.0));
        let facing = q * Vec3::Z;
        assert!((facing - Vec3::X).length() < 1e-5);
    }
}
