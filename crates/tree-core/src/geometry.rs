//! Target-position generators for the two display modes.
//!
//! ORDER targets wrap a cone (the tree); CHAOS targets fill a sphere. The
//! generators draw from a caller-supplied RNG so a fixed seed reproduces a
//! layout, but callers should only rely on counts and bounds.

use crate::constants::{LEDGER_CELL_SIZE, PLACEMENT_ATTEMPTS};
use fnv::FnvHashMap;
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// The cone the ORDER formation is built around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeShape {
    pub base_y: f32,
    pub height: f32,
    pub radius: f32,
}

impl TreeShape {
    pub fn top_y(&self) -> f32 {
        self.base_y + self.height
    }

    /// Horizontal radius of the cone at height `y`, zero at and above the apex.
    pub fn radius_at(&self, y: f32) -> f32 {
        let t = ((y - self.base_y) / self.height).clamp(0.0, 1.0);
        self.radius * (1.0 - t)
    }

    /// Whether `p` lies inside the cone, widened by `slack` in every direction.
    pub fn contains(&self, p: Vec3, slack: f32) -> bool {
        if p.y < self.base_y - slack || p.y > self.top_y() + slack {
            return false;
        }
        let horizontal = (p.x * p.x + p.z * p.z).sqrt();
        horizontal <= self.radius_at(p.y) + slack
    }
}

/// Parameters of a spiral wrapped around the cone surface.
#[derive(Clone, Copy, Debug)]
pub struct Spiral {
    pub turns: f32,
    /// Distance outside the cone surface.
    pub offset: f32,
    /// Fraction of the tree height where the spiral starts.
    pub start: f32,
    /// Fraction of the tree height where the spiral ends.
    pub end: f32,
}

/// Evenly spaced points along a spiral from bottom to top.
pub fn spiral_positions(shape: &TreeShape, spiral: &Spiral, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = (i as f32 + 0.5) / count as f32;
            let along = spiral.start + (spiral.end - spiral.start) * t;
            let y = shape.base_y + shape.height * along;
            let r = shape.radius_at(y) + spiral.offset;
            let angle = t * spiral.turns * TAU;
            Vec3::new(r * angle.cos(), y, r * angle.sin())
        })
        .collect()
}

/// A point inside the cone. Height is drawn so density follows the cone's
/// cross-section; the radial distance is a half-gaussian measured inward from
/// the surface, so `spread` controls how strongly points hug the outside.
pub fn tree_volume_position<R: Rng>(rng: &mut R, shape: &TreeShape, spread: f32) -> Vec3 {
    let u: f32 = rng.gen();
    let t = 1.0 - u.cbrt();
    let y = shape.base_y + shape.height * t;
    let surface = shape.radius_at(y);
    let inward = (gaussian(rng) * spread).abs().min(1.0);
    let r = surface * (1.0 - inward);
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// A point uniformly distributed inside a sphere of `radius` around the origin.
pub fn chaos_position<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    let dir = Vec3::new(gaussian(rng), gaussian(rng), gaussian(rng))
        .try_normalize()
        .unwrap_or(Vec3::Y);
    let u: f32 = rng.gen();
    (dir * radius * u.cbrt()).clamp_length_max(radius)
}

// Box-Muller; one sample per call is plenty for layout work.
fn gaussian<R: Rng>(rng: &mut R) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volume {
    pub center: Vec3,
    pub radius: f32,
}

type CellKey = (i32, i32, i32);

/// Registry of space already claimed by ORDER targets.
///
/// Generators run in priority order and each one places its candidates
/// against everything placed before it. Volumes are bucketed in a uniform
/// grid keyed by the cell of their center.
pub struct OccupiedLedger {
    cell: f32,
    volumes: Vec<Volume>,
    grid: FnvHashMap<CellKey, SmallVec<[usize; 4]>>,
    max_radius: f32,
}

impl Default for OccupiedLedger {
    fn default() -> Self {
        Self::new(LEDGER_CELL_SIZE)
    }
}

impl OccupiedLedger {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell: cell_size.max(1e-3),
            volumes: Vec::new(),
            grid: FnvHashMap::default(),
            max_radius: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    pub fn insert(&mut self, center: Vec3, radius: f32) {
        let idx = self.volumes.len();
        self.volumes.push(Volume { center, radius });
        self.max_radius = self.max_radius.max(radius);
        let key = self.cell_of(center);
        self.grid.entry(key).or_default().push(idx);
    }

    /// Smallest surface-to-surface gap between a sphere at `center` and any
    /// registered volume within `reach`; infinity when nothing is that close.
    pub fn gap(&self, center: Vec3, radius: f32, reach: f32) -> f32 {
        let span = radius + reach + self.max_radius;
        let lo = self.cell_of(center - Vec3::splat(span));
        let hi = self.cell_of(center + Vec3::splat(span));
        let mut best = f32::INFINITY;
        for x in lo.0..=hi.0 {
            for y in lo.1..=hi.1 {
                for z in lo.2..=hi.2 {
                    let Some(bucket) = self.grid.get(&(x, y, z)) else {
                        continue;
                    };
                    for &i in bucket {
                        let v = &self.volumes[i];
                        best = best.min(v.center.distance(center) - v.radius - radius);
                    }
                }
            }
        }
        best
    }

    pub fn is_clear(&self, center: Vec3, radius: f32, clearance: f32) -> bool {
        self.gap(center, radius, clearance) >= clearance
    }

    /// Draw candidates until one keeps `clearance` from everything already
    /// placed, register it and return it. When every attempt collides the
    /// roomiest candidate is used so the layer keeps its instance count.
    pub fn place<R: Rng>(
        &mut self,
        rng: &mut R,
        radius: f32,
        clearance: f32,
        mut candidate: impl FnMut(&mut R) -> Vec3,
    ) -> Vec3 {
        let mut best: Option<(Vec3, f32)> = None;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let p = candidate(&mut *rng);
            let gap = self.gap(p, radius, clearance);
            if gap >= clearance {
                self.insert(p, radius);
                return p;
            }
            if best.map_or(true, |(_, g)| gap > g) {
                best = Some((p, gap));
            }
        }
        let p = match best {
            Some((p, gap)) => {
                log::debug!("[geometry] no clear spot after {PLACEMENT_ATTEMPTS} tries, gap {gap:.2}");
                p
            }
            None => candidate(&mut *rng),
        };
        self.insert(p, radius);
        p
    }

    fn cell_of(&self, p: Vec3) -> CellKey {
        let c = (p / self.cell).floor();
        (c.x as i32, c.y as i32, c.z as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn gap_ignores_far_volumes() {
        let mut ledger = OccupiedLedger::new(1.0);
        ledger.insert(Vec3::new(50.0, 0.0, 0.0), 1.0);
        assert_eq!(ledger.gap(Vec3::ZERO, 1.0, 0.5), f32::INFINITY);
    }

    #[test]
    fn gap_measures_between_surfaces() {
        let mut ledger = OccupiedLedger::new(1.0);
        ledger.insert(Vec3::new(3.0, 0.0, 0.0), 1.0);
        let g = ledger.gap(Vec3::ZERO, 0.5, 2.0);
        assert!((g - 1.5).abs() < 1e-5, "gap was {g}");
    }

    #[test]
    fn gaussian_is_finite() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(gaussian(&mut rng).is_finite());
        }
    }
}
