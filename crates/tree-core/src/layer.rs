//! Visual layers and their per-instance state.
//!
//! Each layer is a fixed set of instances of one mesh kind. Both targets of an
//! instance are chosen once at construction; only the current transform
//! changes afterwards, and only the layer's own driver touches it.

use glam::{Quat, Vec3};

/// Visual layers in the order their drivers run each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Foliage,
    Photos,
    Gifts,
    Balls,
    Gingerbread,
    CandyCanes,
    Bells,
    Lights,
    Star,
}

impl LayerKind {
    pub const ALL: [LayerKind; 9] = [
        LayerKind::Foliage,
        LayerKind::Photos,
        LayerKind::Gifts,
        LayerKind::Balls,
        LayerKind::Gingerbread,
        LayerKind::CandyCanes,
        LayerKind::Bells,
        LayerKind::Lights,
        LayerKind::Star,
    ];

    /// Stable identifier used by the renderer bridge.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Foliage => "foliage",
            Self::Photos => "photos",
            Self::Gifts => "gifts",
            Self::Balls => "balls",
            Self::Gingerbread => "gingerbread",
            Self::CandyCanes => "candy-canes",
            Self::Bells => "bells",
            Self::Lights => "lights",
            Self::Star => "star",
        }
    }

    pub fn spec(&self) -> LayerSpec {
        let base = LayerSpec::default();
        match self {
            Self::Foliage => LayerSpec {
                lerp_rate: 0.04,
                idle: IdleMotion::Still,
                push_back: 1.5,
                reveal_gated: true,
                base_scale: 1.0,
                chaos_spin: 0.0,
                ..base
            },
            Self::Photos => LayerSpec {
                lerp_rate: 0.06,
                idle: IdleMotion::FaceOutward,
                push_back: 1.2,
                base_scale: 1.0,
                footprint: 1.1,
                focusable: true,
                ..base
            },
            Self::Gifts => LayerSpec {
                lerp_rate: 0.05,
                idle: IdleMotion::Spin { speed: 0.4 },
                weighted: true,
                base_scale: 0.7,
                footprint: 0.55,
                ..base
            },
            Self::Balls => LayerSpec {
                lerp_rate: 0.08,
                idle: IdleMotion::Breathe {
                    amplitude: 0.08,
                    speed: 2.0,
                },
                weighted: true,
                base_scale: 0.45,
                footprint: 0.45,
                ..base
            },
            Self::Gingerbread => LayerSpec {
                lerp_rate: 0.06,
                idle: IdleMotion::Sway {
                    amplitude: 0.25,
                    speed: 1.3,
                },
                base_scale: 0.6,
                footprint: 0.5,
                ..base
            },
            Self::CandyCanes => LayerSpec {
                lerp_rate: 0.07,
                idle: IdleMotion::Sway {
                    amplitude: 0.15,
                    speed: 1.1,
                },
                base_scale: 0.6,
                footprint: 0.45,
                ..base
            },
            Self::Bells => LayerSpec {
                lerp_rate: 0.06,
                idle: IdleMotion::Sway {
                    amplitude: 0.35,
                    speed: 2.4,
                },
                weighted: true,
                base_scale: 0.5,
                footprint: 0.45,
                ..base
            },
            Self::Lights => LayerSpec {
                lerp_rate: 0.1,
                idle: IdleMotion::Twinkle { speed: 3.0 },
                push_back: 1.4,
                reveal_gated: true,
                base_scale: 0.25,
                chaos_spin: 0.0,
                ..base
            },
            Self::Star => LayerSpec {
                lerp_rate: 0.03,
                idle: IdleMotion::Spin { speed: 0.8 },
                reveal_gated: true,
                base_scale: 1.4,
                ..base
            },
        }
    }
}

/// What an instance does once it sits in the assembled tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdleMotion {
    Still,
    /// Scale oscillates around the base scale.
    Breathe { amplitude: f32, speed: f32 },
    /// Faces away from the trunk and rocks about that heading.
    Sway { amplitude: f32, speed: f32 },
    /// Faces away from the trunk.
    FaceOutward,
    /// Constant spin about the vertical axis (rad/s).
    Spin { speed: f32 },
    /// Scale flickers between dim and full.
    Twinkle { speed: f32 },
}

/// Per-layer motion policy, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSpec {
    /// Fraction of the remaining distance covered per reference frame.
    pub lerp_rate: f32,
    pub idle: IdleMotion,
    /// Multiplier on the CHAOS target while a photo is focused.
    pub push_back: f32,
    /// Whether instances are hidden above the intro reveal height.
    pub reveal_gated: bool,
    pub base_scale: f32,
    /// Free rotation speed outside ORDER (rad/s).
    pub chaos_spin: f32,
    /// Divide the rate by each instance's weight.
    pub weighted: bool,
    /// Radius claimed in the occupied-region ledger.
    pub footprint: f32,
    /// Instances can be hovered and pulled into focus.
    pub focusable: bool,
}

impl Default for LayerSpec {
    fn default() -> Self {
        Self {
            lerp_rate: 0.05,
            idle: IdleMotion::Still,
            push_back: 1.3,
            reveal_gated: false,
            base_scale: 1.0,
            chaos_spin: 0.8,
            weighted: false,
            footprint: 0.0,
            focusable: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Instance {
    index: usize,
    order_target: Vec3,
    chaos_target: Vec3,
    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    pub(crate) scale: f32,
    pub weight: f32,
    pub color: [f32; 3],
    /// Lean away from vertical (radians) when assembled.
    pub tilt: f32,
    /// Axis of free rotation outside ORDER.
    pub spin_axis: Vec3,
    /// Per-instance offset for idle oscillations.
    pub phase: f32,
}

impl Instance {
    /// A new instance starts at its CHAOS target.
    pub fn new(index: usize, order_target: Vec3, chaos_target: Vec3) -> Self {
        Self {
            index,
            order_target,
            chaos_target,
            position: chaos_target,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            weight: 1.0,
            color: [1.0, 1.0, 1.0],
            tilt: 0.0,
            spin_axis: Vec3::Y,
            phase: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn order_target(&self) -> Vec3 {
        self.order_target
    }

    pub fn chaos_target(&self) -> Vec3 {
        self.chaos_target
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub kind: LayerKind,
    pub spec: LayerSpec,
    pub instances: Vec<Instance>,
}

impl Layer {
    pub fn new(kind: LayerKind, instances: Vec<Instance>) -> Self {
        let spec = kind.spec();
        let instances = instances
            .into_iter()
            .map(|mut inst| {
                inst.scale = spec.base_scale;
                inst
            })
            .collect();
        Self {
            kind,
            spec,
            instances,
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
