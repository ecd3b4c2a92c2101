// Layer drivers and the per-frame orchestration, observed through a
// recording sink.

use glam::{Quat, Vec2, Vec3};
use std::collections::HashMap;
use std::time::Duration;
use tree_core::{
    dispatch, frame_alpha, Camera, Cursor, Experience, FrameInput, InputSource, Instance,
    InstanceTransform, InteractionStore, Layer, LayerCounts, LayerDriver, LayerKind, RenderSink,
    RevealState, SceneEvent, SceneMode, TreeConfig, Uniform, FOCUS_DISTANCE, FOCUS_SCALE,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorder {
    instances: HashMap<LayerKind, Vec<InstanceTransform>>,
    batches: Vec<LayerKind>,
    uniforms: Vec<(LayerKind, Uniform)>,
    scene_rotation: Option<Quat>,
}

impl RenderSink for Recorder {
    fn set_instances(&mut self, layer: LayerKind, transforms: &[InstanceTransform]) {
        self.batches.push(layer);
        self.instances.insert(layer, transforms.to_vec());
    }

    fn set_uniform(&mut self, layer: LayerKind, uniform: Uniform) {
        self.uniforms.push((layer, uniform));
    }

    fn set_scene_rotation(&mut self, rotation: Quat) {
        self.scene_rotation = Some(rotation);
    }
}

fn input(mode: SceneMode, camera: &Camera) -> FrameInput<'_> {
    FrameInput {
        mode,
        time: 0.0,
        dt: DT,
        reveal: RevealState::default(),
        camera,
        scene_rotation: Quat::IDENTITY,
        photo_rotation: Vec2::ZERO,
        selected_photo: None,
        hovered_photo: None,
    }
}

fn single(kind: LayerKind, order: Vec3, chaos: Vec3) -> LayerDriver {
    LayerDriver::new(Layer::new(kind, vec![Instance::new(0, order, chaos)]))
}

fn run(driver: &mut LayerDriver, frame: &FrameInput, frames: usize) -> Recorder {
    let mut sink = Recorder::default();
    for _ in 0..frames {
        driver.tick(frame, &mut sink);
    }
    sink
}

#[test]
fn order_mode_converges_on_the_tree() {
    let camera = Camera::default();
    let order = Vec3::new(2.0, 1.0, 3.0);
    let mut d = single(LayerKind::Balls, order, Vec3::new(-20.0, 5.0, 8.0));
    run(&mut d, &input(SceneMode::Order, &camera), 600);
    let pos = d.layer().instances[0].position();
    assert!(pos.distance(order) < 1e-2, "{pos}");
}

#[test]
fn chaos_mode_returns_to_the_scatter_target() {
    let camera = Camera::default();
    let chaos = Vec3::new(10.0, -4.0, 6.0);
    let mut d = single(LayerKind::Gingerbread, Vec3::ZERO, chaos);
    run(&mut d, &input(SceneMode::Order, &camera), 300);
    run(&mut d, &input(SceneMode::Chaos, &camera), 600);
    assert!(d.layer().instances[0].position().distance(chaos) < 1e-2);
}

#[test]
fn photo_focus_pushes_background_back_slowly() {
    let camera = Camera::default();
    let chaos = Vec3::new(4.0, 2.0, -6.0);
    let mut d = single(LayerKind::Gifts, Vec3::ZERO, chaos);
    run(&mut d, &input(SceneMode::PhotoFocus, &camera), 1);

    // One reference frame at a tenth of the layer rate toward 1.3x the target.
    let alpha = frame_alpha(0.05 * 0.1, DT);
    let expected = chaos + (chaos * 1.3 - chaos) * alpha;
    let pos = d.layer().instances[0].position();
    assert!(pos.distance(expected) < 1e-4, "{pos} vs {expected}");

    let mut fast = single(LayerKind::Gifts, Vec3::ZERO, chaos);
    run(&mut fast, &input(SceneMode::Order, &camera), 1);
    let moved_fast = fast.layer().instances[0].position().distance(chaos);
    let moved_slow = pos.distance(chaos);
    assert!(moved_slow < moved_fast);
}

#[test]
fn heavier_instances_move_slower() {
    let camera = Camera::default();
    let chaos = Vec3::new(0.0, 0.0, 15.0);
    let mut light = Instance::new(0, Vec3::ZERO, chaos);
    light.weight = 1.0;
    let mut heavy = Instance::new(1, Vec3::ZERO, chaos);
    heavy.weight = 2.5;
    let mut d = LayerDriver::new(Layer::new(LayerKind::Gifts, vec![light, heavy]));
    run(&mut d, &input(SceneMode::Order, &camera), 10);
    let inst = &d.layer().instances;
    assert!(inst[0].position().length() < inst[1].position().length());
}

#[test]
fn selected_photo_comes_to_the_camera() {
    let camera = Camera::default();
    let target = camera.eye + camera.forward() * FOCUS_DISTANCE;
    for group in [Quat::IDENTITY, Quat::from_rotation_y(0.7)] {
        let mut d = single(LayerKind::Photos, Vec3::ZERO, Vec3::new(-12.0, 3.0, -9.0));
        let frame = FrameInput {
            selected_photo: Some(0),
            scene_rotation: group,
            ..input(SceneMode::PhotoFocus, &camera)
        };
        let sink = run(&mut d, &frame, 600);
        let inst = &d.layer().instances[0];
        let world = group * inst.position();
        assert!(world.distance(target) < 1e-2, "{world} vs {target}");
        assert!((inst.scale() - FOCUS_SCALE).abs() < 1e-3);
        assert_eq!(sink.instances[&LayerKind::Photos][0].scale, inst.scale());
    }
}

#[test]
fn selection_only_applies_to_the_photo_layer() {
    let camera = Camera::default();
    let chaos = Vec3::new(5.0, 0.0, 5.0);
    let mut d = single(LayerKind::Bells, Vec3::ZERO, chaos);
    let frame = FrameInput {
        selected_photo: Some(0),
        ..input(SceneMode::PhotoFocus, &camera)
    };
    run(&mut d, &frame, 60);
    let pos = d.layer().instances[0].position();
    let target = camera.eye + camera.forward() * FOCUS_DISTANCE;
    assert!(pos.distance(chaos) < pos.distance(target));
}

#[test]
fn gated_layers_hide_above_the_reveal_line() {
    let camera = Camera::default();
    let p = Vec3::new(1.0, 5.0, 0.0);
    let mut lights = single(LayerKind::Lights, p, p);
    let mut gifts = single(LayerKind::Gifts, p, p);
    let hidden = FrameInput {
        reveal: RevealState {
            height: 0.0,
            brightness: 1.0,
        },
        ..input(SceneMode::Chaos, &camera)
    };
    let sink = run(&mut lights, &hidden, 1);
    assert_eq!(sink.instances[&LayerKind::Lights][0].scale, 0.0);
    assert!(sink
        .uniforms
        .contains(&(LayerKind::Lights, Uniform::RevealHeight(0.0))));

    let sink = run(&mut gifts, &hidden, 1);
    assert!(sink.instances[&LayerKind::Gifts][0].scale > 0.0);
    assert_eq!(sink.uniforms, vec![(LayerKind::Gifts, Uniform::Time(0.0))]);

    let sink = run(&mut lights, &input(SceneMode::Chaos, &camera), 1);
    assert!(sink.instances[&LayerKind::Lights][0].scale > 0.0);
}

#[test]
fn hovered_photo_is_enlarged() {
    let camera = Camera::default();
    let p = Vec3::new(1.0, 1.0, 1.0);
    let mut d = single(LayerKind::Photos, p, p);
    let frame = FrameInput {
        hovered_photo: Some(0),
        ..input(SceneMode::Chaos, &camera)
    };
    let sink = run(&mut d, &frame, 1);
    assert!((sink.instances[&LayerKind::Photos][0].scale - 1.25).abs() < 1e-6);
}

fn small_config() -> TreeConfig {
    TreeConfig {
        chaos_radius: 5.0,
        counts: LayerCounts {
            foliage: 50,
            photos: 6,
            gifts: 3,
            balls: 3,
            gingerbread: 2,
            candy_canes: 2,
            bells: 2,
            lights: 10,
        },
        ..TreeConfig::default()
    }
}

#[test]
fn experience_ticks_every_layer_in_order() {
    let camera = Camera::default();
    let mut exp = Experience::build(&small_config(), Duration::ZERO);
    let mut store = InteractionStore::default();
    let mut sink = Recorder::default();
    exp.tick(&mut store, &camera, Duration::ZERO, DT, &mut sink);

    assert_eq!(sink.batches, LayerKind::ALL.to_vec());
    assert!(sink.scene_rotation.is_some());
    assert!(sink
        .uniforms
        .contains(&(LayerKind::Foliage, Uniform::RevealHeight(-12.0))));
    assert_eq!(sink.instances[&LayerKind::Photos].len(), 6);
    assert_eq!(exp.reveal().height, -12.0);
}

#[test]
fn cursor_over_a_card_hovers_it_only_in_chaos() {
    let camera = Camera::default();
    let mut exp = Experience::build(&small_config(), Duration::ZERO);
    let photos = exp.layer(LayerKind::Photos).unwrap();
    let ndc = camera.project_ndc(photos.instances[0].position()).unwrap();

    let cursor = Cursor {
        x: ndc.x,
        y: ndc.y,
        active: true,
    };
    let hit = exp.pick_photo(cursor, &camera).expect("card under cursor");
    let hit_pos = exp.layer(LayerKind::Photos).unwrap().instances[hit].position();
    let hit_ndc = camera.project_ndc(hit_pos).unwrap();
    assert!(hit_ndc.distance(ndc) < 0.15);
    assert_eq!(exp.pick_photo(Cursor { active: false, ..cursor }, &camera), None);

    let mut store = InteractionStore::default();
    store.set_cursor(ndc.x, ndc.y, true, InputSource::Mouse, Duration::ZERO);
    let mut sink = Recorder::default();
    exp.tick(&mut store, &camera, Duration::ZERO, DT, &mut sink);
    assert_eq!(store.hovered_photo(), None);

    dispatch(&mut store, SceneEvent::Toggle);
    exp.tick(&mut store, &camera, Duration::from_millis(16), DT, &mut sink);
    assert!(store.hovered_photo().is_some());
}

#[test]
fn auto_spin_only_turns_the_assembled_tree() {
    let camera = Camera::default();
    let mut exp = Experience::build(&small_config(), Duration::ZERO);
    let mut store = InteractionStore::default();
    dispatch(&mut store, SceneEvent::Toggle);
    let mut sink = Recorder::default();
    for i in 0..120 {
        exp.tick(&mut store, &camera, Duration::from_millis(i * 16), DT, &mut sink);
    }
    assert!(exp.group_rotation().angle_between(Quat::IDENTITY) < 1e-4);

    dispatch(&mut store, SceneEvent::Toggle);
    assert_eq!(store.mode(), SceneMode::Order);
    for i in 120..240 {
        exp.tick(&mut store, &camera, Duration::from_millis(i * 16), DT, &mut sink);
    }
    assert!(exp.group_rotation().angle_between(Quat::IDENTITY) > 0.05);
}
