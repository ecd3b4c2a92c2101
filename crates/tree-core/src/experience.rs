//! The per-frame tick: intro, scene group rotation, hover picking, then every
//! layer driver in declared order.

use crate::animation::{frame_alpha, FrameInput, LayerDriver, RenderSink};
use crate::camera::Camera;
use crate::constants::{HOVER_RADIUS_NDC, ORDER_AUTO_SPIN, SCENE_ROTATION_RATE};
use crate::interaction::{Cursor, InteractionStore};
use crate::intro::{IntroSequencer, RevealState};
use crate::layer::{Layer, LayerKind};
use crate::scene::SceneMode;
use crate::tree::{build_layers, TreeConfig};
use glam::{EulerRot, Quat};
use std::f32::consts::TAU;
use std::time::Duration;

pub struct Experience {
    drivers: Vec<LayerDriver>,
    intro: IntroSequencer,
    group_rotation: Quat,
    auto_spin: f32,
    last_reveal: RevealState,
}

impl Experience {
    /// `start` is the session time the intro begins at.
    pub fn new(layers: Vec<Layer>, start: Duration) -> Self {
        Self {
            drivers: layers.into_iter().map(LayerDriver::new).collect(),
            intro: IntroSequencer::new(start),
            group_rotation: Quat::IDENTITY,
            auto_spin: 0.0,
            last_reveal: RevealState::default(),
        }
    }

    pub fn build(config: &TreeConfig, start: Duration) -> Self {
        Self::new(build_layers(config), start)
    }

    pub fn drivers(&self) -> &[LayerDriver] {
        &self.drivers
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.drivers
            .iter()
            .find(|d| d.kind() == kind)
            .map(|d| d.layer())
    }

    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    pub fn reveal(&self) -> RevealState {
        self.last_reveal
    }

    pub fn group_rotation(&self) -> Quat {
        self.group_rotation
    }

    pub fn tick(
        &mut self,
        store: &mut InteractionStore,
        camera: &Camera,
        now: Duration,
        dt: f32,
        sink: &mut dyn RenderSink,
    ) {
        let reveal = self.intro.tick(now);
        self.last_reveal = reveal;
        let mode = store.mode();

        if mode == SceneMode::Order {
            self.auto_spin = (self.auto_spin + ORDER_AUTO_SPIN * dt) % TAU;
        }
        let r = store.scene_rotation();
        let target = Quat::from_euler(EulerRot::YXZ, r.y + self.auto_spin, r.x, 0.0);
        self.group_rotation = self
            .group_rotation
            .slerp(target, frame_alpha(SCENE_ROTATION_RATE, dt))
            .normalize();
        sink.set_scene_rotation(self.group_rotation);

        let hovered = match mode {
            SceneMode::Chaos => self.pick_photo(store.cursor(), camera),
            _ => None,
        };
        store.set_hovered_photo(hovered);

        let input = FrameInput {
            mode,
            time: now.as_secs_f32(),
            dt,
            reveal,
            camera,
            scene_rotation: self.group_rotation,
            photo_rotation: store.photo_rotation(),
            selected_photo: store.selected_photo(),
            hovered_photo: store.hovered_photo(),
        };
        for driver in &mut self.drivers {
            driver.tick(&input, sink);
        }
    }

    /// Photo card under the cursor. Cards are tested in index order and the
    /// last one within range wins.
    pub fn pick_photo(&self, cursor: Cursor, camera: &Camera) -> Option<usize> {
        if !cursor.active {
            return None;
        }
        let photos = self.drivers.iter().find(|d| d.layer().spec.focusable)?;
        let mut hit = None;
        for inst in &photos.layer().instances {
            let world = self.group_rotation * inst.position();
            let Some(ndc) = camera.project_ndc(world) else {
                continue;
            };
            if ndc.distance(cursor.position()) < HOVER_RADIUS_NDC {
                hit = Some(inst.index());
            }
        }
        hit
    }
}
