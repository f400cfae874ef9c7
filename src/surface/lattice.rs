//! Separable sample lattices over the world square.
//!
//! Three lattices share one layout: marks sit on the N×N grid, X-bisegments
//! sit halfway between neighbouring marks along x, Y-bisegments halfway along y.

use super::field::{ripple_height, HeightField};
use super::visibility::is_visible;
use super::WorldBounds;
use crate::fixed::{LookAt, Q, Q2, Q3};
use crate::projector::{Projector, ScreenPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatticeKind {
    Marks,
    XBisegments,
    YBisegments,
}

/// Which cells of a lattice are kept up to date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    Full,
    Border,
}

/// One cached surface point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatticeSample {
    pub world: Q3,
    pub distance: Q,
    pub visible: bool,
    pub screen: ScreenPoint,
}

/// Evenly spaced axis of `lines` marks centred on 0, spanning at most `scale`.
pub fn mark_axis(lines: usize, scale: Q) -> Vec<Q> {
    let intervals = lines.saturating_sub(1).max(1) as i32;
    // Even step keeps every mark exactly symmetric about the origin
    let half_step = (scale.raw() / intervals) >> 1;
    (0..lines as i32)
        .map(|i| Q::from_raw((2 * i - intervals) * half_step))
        .collect()
}

fn midpoints(axis: &[Q]) -> Vec<Q> {
    axis.windows(2).map(|pair| (pair[0] + pair[1]) >> 1).collect()
}

/// Shape and coverage of a lattice, detached from its samples.
#[derive(Clone, Copy, Debug)]
struct Layout {
    kind: LatticeKind,
    coverage: Coverage,
    cols: usize,
    rows: usize,
}

impl Layout {
    fn is_border(self, i: usize, j: usize) -> bool {
        let last_i = self.cols.saturating_sub(1);
        let last_j = self.rows.saturating_sub(1);
        match self.kind {
            LatticeKind::Marks => i == 0 || j == 0 || i == last_i || j == last_j,
            LatticeKind::XBisegments => j == 0 || j == last_j,
            LatticeKind::YBisegments => i == 0 || i == last_i,
        }
    }

    fn is_covered(self, i: usize, j: usize) -> bool {
        match self.coverage {
            Coverage::Full => true,
            Coverage::Border => self.is_border(i, j),
        }
    }
}

/// Covered samples with their `(i, j)` cell, in storage order.
fn covered(
    layout: Layout,
    samples: &mut [LatticeSample],
) -> impl Iterator<Item = (usize, usize, &mut LatticeSample)> {
    let rows = layout.rows.max(1);
    samples
        .iter_mut()
        .enumerate()
        .map(move |(idx, sample)| (idx / rows, idx % rows, sample))
        .filter(move |&(i, j, _)| layout.is_covered(i, j))
}

pub struct SampledSurface {
    kind: LatticeKind,
    coverage: Coverage,
    xs: Vec<Q>,
    ys: Vec<Q>,
    samples: Vec<LatticeSample>,
    // Squared offsets from the source along each axis
    dx2: Vec<Q>,
    dy2: Vec<Q>,
}

impl SampledSurface {
    /// Build the lattice of `kind` from the mark axis positions.
    pub fn new(kind: LatticeKind, marks: &[Q]) -> Self {
        let (xs, ys) = match kind {
            LatticeKind::Marks => (marks.to_vec(), marks.to_vec()),
            LatticeKind::XBisegments => (midpoints(marks), marks.to_vec()),
            LatticeKind::YBisegments => (marks.to_vec(), midpoints(marks)),
        };

        let mut samples = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                samples.push(LatticeSample {
                    world: Q3::new(x, y, Q::ZERO),
                    ..LatticeSample::default()
                });
            }
        }

        Self {
            kind,
            coverage: Coverage::Full,
            dx2: vec![Q::ZERO; xs.len()],
            dy2: vec![Q::ZERO; ys.len()],
            xs,
            ys,
            samples,
        }
    }

    pub fn set_coverage(&mut self, coverage: Coverage) {
        self.coverage = coverage;
    }

    /// Number of columns (samples along x).
    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows (samples along y).
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    /// Sample at column `i`, row `j`.
    pub fn sample(&self, i: usize, j: usize) -> &LatticeSample {
        &self.samples[i * self.ys.len() + j]
    }

    pub fn samples(&self) -> impl Iterator<Item = &LatticeSample> {
        self.samples.iter()
    }

    fn layout(&self) -> Layout {
        Layout {
            kind: self.kind,
            coverage: self.coverage,
            cols: self.cols(),
            rows: self.rows(),
        }
    }

    /// Border cells are the ones a border-only plot draws.
    pub fn is_border(&self, i: usize, j: usize) -> bool {
        self.layout().is_border(i, j)
    }

    pub fn is_covered(&self, i: usize, j: usize) -> bool {
        self.layout().is_covered(i, j)
    }

    /// Refresh horizontal distances to `center` from per-axis squared offsets.
    pub fn update_distances(&mut self, center: Q2) {
        for (d2, &x) in self.dx2.iter_mut().zip(&self.xs) {
            let d = center.x - x;
            *d2 = d * d;
        }
        for (d2, &y) in self.dy2.iter_mut().zip(&self.ys) {
            let d = center.y - y;
            *d2 = d * d;
        }

        let layout = self.layout();
        for (i, j, sample) in covered(layout, &mut self.samples) {
            sample.distance = (self.dx2[i] + self.dy2[j]).sqrt();
        }
    }

    /// Refresh z from the cached distances.
    pub fn update_heights(&mut self, phase: i32) {
        let layout = self.layout();
        for (_, _, sample) in covered(layout, &mut self.samples) {
            sample.world.z = ripple_height(sample.distance, phase);
        }
    }

    /// Refresh the visibility flag of every covered sample as seen from `viewer`.
    pub fn update_visibility<F: HeightField + ?Sized>(
        &mut self,
        viewer: Q3,
        field: &F,
        bounds: &WorldBounds,
        iterations: u32,
    ) {
        let layout = self.layout();
        for (_, _, sample) in covered(layout, &mut self.samples) {
            sample.visible = is_visible(sample.world, viewer, field, bounds, iterations);
        }
    }

    pub fn update_screen(&mut self, projector: &Projector, camera: &LookAt) {
        let layout = self.layout();
        for (_, _, sample) in covered(layout, &mut self.samples) {
            sample.screen = projector.project(camera, sample.world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{phase_for_tick, Ripple};

    fn tau() -> Q {
        Q::from_f32(6.283185)
    }

    #[test]
    fn test_mark_axis_symmetric_and_even() {
        for lines in [2, 7, 8, 31] {
            let axis = mark_axis(lines, tau());
            assert_eq!(axis.len(), lines);
            let step = axis[1] - axis[0];
            let nominal = tau() / Q::from_int(lines as i32 - 1);
            assert!((step - nominal).abs().raw() <= 1);
            for i in 0..lines {
                assert_eq!(axis[i], -axis[lines - 1 - i]);
                if i > 0 {
                    assert_eq!(axis[i] - axis[i - 1], step);
                }
            }
            let half = tau() >> 1;
            assert!(axis[0] >= -half && axis[lines - 1] <= half);
        }
    }

    #[test]
    fn test_bisegments_sit_between_marks() {
        let axis = mark_axis(7, tau());
        let xbis = SampledSurface::new(LatticeKind::XBisegments, &axis);
        assert_eq!((xbis.cols(), xbis.rows()), (6, 7));
        let ybis = SampledSurface::new(LatticeKind::YBisegments, &axis);
        assert_eq!((ybis.cols(), ybis.rows()), (7, 6));

        for i in 0..6 {
            let x = xbis.sample(i, 3).world.x;
            assert!(x > axis[i] && x < axis[i + 1]);
            assert_eq!(xbis.sample(i, 3).world.y, axis[3]);
        }
    }

    #[test]
    fn test_distance_cache_matches_direct() {
        let axis = mark_axis(9, tau());
        let mut marks = SampledSurface::new(LatticeKind::Marks, &axis);
        let center = Q2::new(Q::from_f32(0.37), Q::from_f32(-1.21));
        marks.update_distances(center);

        for sample in marks.samples() {
            let direct = sample.world.xy().distance(center);
            assert!((sample.distance - direct).abs().raw() <= 1);
        }
    }

    #[test]
    fn test_border_coverage_leaves_interior_alone() {
        let axis = mark_axis(5, tau());
        let mut xbis = SampledSurface::new(LatticeKind::XBisegments, &axis);
        xbis.set_coverage(Coverage::Border);
        xbis.update_distances(Q2::new(Q::ONE, Q::ONE));

        assert!(xbis.sample(1, 0).distance > Q::ZERO);
        assert!(xbis.sample(1, 4).distance > Q::ZERO);
        assert_eq!(xbis.sample(1, 2).distance, Q::ZERO);
    }

    #[test]
    fn test_border_coverage_of_non_square_lattice() {
        let axis = mark_axis(6, tau());
        let mut ybis = SampledSurface::new(LatticeKind::YBisegments, &axis);
        ybis.set_coverage(Coverage::Border);
        let center = Q2::new(Q::from_f32(-0.4), Q::from_f32(0.9));
        ybis.update_distances(center);

        for i in 0..ybis.cols() {
            for j in 0..ybis.rows() {
                let sample = ybis.sample(i, j);
                if i == 0 || i == ybis.cols() - 1 {
                    let direct = sample.world.xy().distance(center);
                    assert!((sample.distance - direct).abs().raw() <= 1);
                } else {
                    assert_eq!(sample.distance, Q::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_heights_follow_distances() {
        let axis = mark_axis(7, tau());
        let mut marks = SampledSurface::new(LatticeKind::Marks, &axis);
        marks.update_distances(Q2::ORIGIN);
        let phase = phase_for_tick(0, 256);
        marks.update_heights(phase);

        let ripple = Ripple::new(Q2::ORIGIN, phase);
        for sample in marks.samples() {
            assert_eq!(
                sample.world.z,
                ripple.height_at(sample.world.x, sample.world.y)
            );
        }
        assert_eq!(marks.sample(3, 3).world.z, Q::ONE);
    }
}
