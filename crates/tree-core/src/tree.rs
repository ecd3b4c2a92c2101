//! Builds every layer of the tree from a [`TreeConfig`].
//!
//! ORDER targets for ornament layers are placed through one shared
//! [`OccupiedLedger`], in priority order: the photo spiral first, then gifts,
//! balls, gingerbread, candy canes and bells. Foliage, lights and the star do
//! not claim space.

use crate::constants::{CHAOS_RADIUS, DEFAULT_SEED, ORDER_CLEARANCE, TREE_BASE_Y, TREE_HEIGHT, TREE_RADIUS};
use crate::geometry::{
    chaos_position, spiral_positions, tree_volume_position, OccupiedLedger, Spiral, TreeShape,
};
use crate::layer::{Instance, Layer, LayerKind};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerCounts {
    pub foliage: usize,
    pub photos: usize,
    pub gifts: usize,
    pub balls: usize,
    pub gingerbread: usize,
    pub candy_canes: usize,
    pub bells: usize,
    pub lights: usize,
}

impl Default for LayerCounts {
    fn default() -> Self {
        Self {
            foliage: 3000,
            photos: 12,
            gifts: 24,
            balls: 60,
            gingerbread: 16,
            candy_canes: 20,
            bells: 16,
            lights: 240,
        }
    }
}

impl LayerCounts {
    pub fn get(&self, kind: LayerKind) -> usize {
        match kind {
            LayerKind::Foliage => self.foliage,
            LayerKind::Photos => self.photos,
            LayerKind::Gifts => self.gifts,
            LayerKind::Balls => self.balls,
            LayerKind::Gingerbread => self.gingerbread,
            LayerKind::CandyCanes => self.candy_canes,
            LayerKind::Bells => self.bells,
            LayerKind::Lights => self.lights,
            LayerKind::Star => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    pub seed: u64,
    pub shape: TreeShape,
    pub chaos_radius: f32,
    pub counts: LayerCounts,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            shape: TreeShape {
                base_y: TREE_BASE_Y,
                height: TREE_HEIGHT,
                radius: TREE_RADIUS,
            },
            chaos_radius: CHAOS_RADIUS,
            counts: LayerCounts::default(),
        }
    }
}

impl TreeConfig {
    /// The photo layer always has one card per manifest entry.
    pub fn with_photo_count(mut self, photos: usize) -> Self {
        self.counts.photos = photos;
        self
    }
}

const PHOTO_SPIRAL: Spiral = Spiral {
    turns: 2.5,
    offset: 0.9,
    start: 0.1,
    end: 0.85,
};

const LIGHT_SPIRAL: Spiral = Spiral {
    turns: 8.0,
    offset: 0.2,
    start: 0.02,
    end: 0.97,
};

// Ornaments hug the cone surface.
const ORNAMENT_SPREAD: f32 = 0.08;
const FOLIAGE_SPREAD: f32 = 0.35;
const STAR_LIFT: f32 = 0.6;

const FOLIAGE_GREENS: &[[f32; 3]] = &[[0.05, 0.35, 0.12], [0.1, 0.5, 0.2], [0.2, 0.6, 0.25]];
const GIFT_COLORS: &[[f32; 3]] = &[
    [0.8, 0.1, 0.1],
    [0.1, 0.5, 0.2],
    [0.9, 0.75, 0.2],
    [0.95, 0.95, 0.95],
];
const BALL_COLORS: &[[f32; 3]] = &[
    [0.85, 0.08, 0.1],
    [1.0, 0.8, 0.3],
    [0.85, 0.85, 0.9],
    [0.15, 0.25, 0.75],
];
const LIGHT_COLORS: &[[f32; 3]] = &[
    [1.0, 0.9, 0.7],
    [1.0, 0.6, 0.2],
    [1.0, 0.2, 0.2],
    [0.3, 1.0, 0.4],
    [0.4, 0.6, 1.0],
];
const GINGERBREAD: [f32; 3] = [0.55, 0.3, 0.12];
const CANDY_WHITE: [f32; 3] = [1.0, 0.95, 0.95];
const GOLD: [f32; 3] = [1.0, 0.78, 0.25];

/// Build all layers, returned in driver order ([`LayerKind::ALL`]).
pub fn build_layers(config: &TreeConfig) -> Vec<Layer> {
    let shape = config.shape;
    let mut ledger = OccupiedLedger::default();
    let mut layers = Vec::with_capacity(LayerKind::ALL.len());

    // Ledger priority order.
    layers.push(build_photos(config, &mut ledger));
    for kind in [
        LayerKind::Gifts,
        LayerKind::Balls,
        LayerKind::Gingerbread,
        LayerKind::CandyCanes,
        LayerKind::Bells,
    ] {
        layers.push(build_ornaments(config, kind, &mut ledger));
    }
    layers.push(build_foliage(config));
    layers.push(build_lights(config));
    layers.push(build_star(config, &shape));

    log::info!(
        "[tree] built {} layers, {} ledger volumes",
        layers.len(),
        ledger.len()
    );
    layers.sort_by_key(|l| l.kind);
    layers
}

// Independent stream per layer so changing one count leaves the others alone.
fn layer_rng(seed: u64, kind: LayerKind) -> StdRng {
    let mix = seed ^ (kind as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

fn decorate(inst: &mut Instance, rng: &mut StdRng) {
    inst.spin_axis = chaos_position(rng, 1.0).try_normalize().unwrap_or(Vec3::Y);
    inst.phase = rng.gen::<f32>() * TAU;
}

fn pick(rng: &mut StdRng, palette: &[[f32; 3]]) -> [f32; 3] {
    palette.choose(rng).copied().unwrap_or([1.0, 1.0, 1.0])
}

fn build_photos(config: &TreeConfig, ledger: &mut OccupiedLedger) -> Layer {
    let kind = LayerKind::Photos;
    let footprint = kind.spec().footprint;
    let mut rng = layer_rng(config.seed, kind);
    let targets = spiral_positions(&config.shape, &PHOTO_SPIRAL, config.counts.photos);
    let instances = targets
        .into_iter()
        .enumerate()
        .map(|(i, order)| {
            ledger.insert(order, footprint);
            let mut inst = Instance::new(i, order, chaos_position(&mut rng, config.chaos_radius));
            decorate(&mut inst, &mut rng);
            inst
        })
        .collect();
    Layer::new(kind, instances)
}

fn build_ornaments(config: &TreeConfig, kind: LayerKind, ledger: &mut OccupiedLedger) -> Layer {
    let spec = kind.spec();
    let shape = config.shape;
    let mut rng = layer_rng(config.seed, kind);
    let count = config.counts.get(kind);

    let instances = (0..count)
        .map(|i| {
            let order = ledger.place(&mut rng, spec.footprint, ORDER_CLEARANCE, |r| {
                tree_volume_position(r, &shape, ORNAMENT_SPREAD)
            });
            let mut inst = Instance::new(i, order, chaos_position(&mut rng, config.chaos_radius));
            decorate(&mut inst, &mut rng);
            match kind {
                LayerKind::Gifts => {
                    inst.color = pick(&mut rng, GIFT_COLORS);
                    inst.weight = rng.gen_range(1.0..2.5);
                }
                LayerKind::Balls => {
                    inst.color = pick(&mut rng, BALL_COLORS);
                    inst.weight = rng.gen_range(0.8..1.6);
                }
                LayerKind::Gingerbread => {
                    inst.color = GINGERBREAD;
                    inst.tilt = rng.gen_range(-0.3..0.3);
                }
                LayerKind::CandyCanes => {
                    inst.color = CANDY_WHITE;
                    inst.tilt = rng.gen_range(-0.4..0.4);
                }
                LayerKind::Bells => {
                    inst.color = GOLD;
                    inst.weight = rng.gen_range(1.0..1.8);
                    inst.tilt = rng.gen_range(-0.2..0.2);
                }
                _ => {}
            }
            inst
        })
        .collect();
    Layer::new(kind, instances)
}

fn build_foliage(config: &TreeConfig) -> Layer {
    let kind = LayerKind::Foliage;
    let mut rng = layer_rng(config.seed, kind);
    let instances = (0..config.counts.foliage)
        .map(|i| {
            let order = tree_volume_position(&mut rng, &config.shape, FOLIAGE_SPREAD);
            let mut inst = Instance::new(i, order, chaos_position(&mut rng, config.chaos_radius));
            inst.color = pick(&mut rng, FOLIAGE_GREENS);
            inst.phase = rng.gen::<f32>() * TAU;
            inst
        })
        .collect();
    Layer::new(kind, instances)
}

fn build_lights(config: &TreeConfig) -> Layer {
    let kind = LayerKind::Lights;
    let mut rng = layer_rng(config.seed, kind);
    let targets = spiral_positions(&config.shape, &LIGHT_SPIRAL, config.counts.lights);
    let instances = targets
        .into_iter()
        .enumerate()
        .map(|(i, order)| {
            let mut inst = Instance::new(i, order, chaos_position(&mut rng, config.chaos_radius));
            inst.color = pick(&mut rng, LIGHT_COLORS);
            inst.phase = rng.gen::<f32>() * TAU;
            inst
        })
        .collect();
    Layer::new(kind, instances)
}

fn build_star(config: &TreeConfig, shape: &TreeShape) -> Layer {
    let kind = LayerKind::Star;
    let mut rng = layer_rng(config.seed, kind);
    let apex = Vec3::new(0.0, shape.top_y() + STAR_LIFT, 0.0);
    let mut star = Instance::new(0, apex, chaos_position(&mut rng, config.chaos_radius));
    star.color = GOLD;
    Layer::new(kind, vec![star])
}
