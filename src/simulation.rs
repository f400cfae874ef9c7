//! The simulation context: lattices, oscillator, camera and display modes.

use log::{debug, info, trace};

use crate::camera::CameraSystem;
use crate::fixed::Q3;
use crate::modes::{ColorMode, Command, OscillatorMode, PlotterMode};
use crate::oscillator::Oscillator;
use crate::params::Config;
use crate::projector::{Projector, ScreenSize};
use crate::render::{DrawContext, Palette, Shade};
use crate::sensor::Sensor;
use crate::surface::{
    mark_axis, solve_terminator, Coverage, LatticeKind, LatticeSample, Ripple, SampledSurface,
    WorldBounds,
};

/// Lattice coverage each plotter needs: (marks, x-bisegments, y-bisegments).
fn coverage_for(mode: PlotterMode) -> [Coverage; 3] {
    match mode {
        PlotterMode::Dots => [Coverage::Full, Coverage::Border, Coverage::Border],
        PlotterMode::Lines => [Coverage::Full, Coverage::Full, Coverage::Border],
        PlotterMode::Grid => [Coverage::Full, Coverage::Full, Coverage::Full],
    }
}

fn shade_of(sample: &LatticeSample) -> Shade {
    Shade::new(sample.world.z, sample.distance)
}

pub struct Simulation {
    marks: SampledSurface,
    x_bisegments: SampledSurface,
    y_bisegments: SampledSurface,
    bounds: WorldBounds,
    oscillator: Oscillator,
    camera: CameraSystem,
    projector: Projector,

    plotter_mode: PlotterMode,
    color_mode: ColorMode,
    inverted: bool,
    monochrome: bool,
    interactive: bool,

    visibility_iterations: u32,
    terminator_iterations: u32,
    tick_count: u32,
    dirty: bool,
}

impl Simulation {
    /// Build the world from a validated configuration and enter the initial modes.
    pub fn new(config: &Config, sensor: &mut dyn Sensor) -> Self {
        let world = &config.world;
        let axis = mark_axis(world.grid_lines, world.scale());
        let size = ScreenSize::new(config.render.screen_width, config.render.screen_height);

        let mut sim = Self {
            marks: SampledSurface::new(LatticeKind::Marks, &axis),
            x_bisegments: SampledSurface::new(LatticeKind::XBisegments, &axis),
            y_bisegments: SampledSurface::new(LatticeKind::YBisegments, &axis),
            bounds: WorldBounds::from_half_scale(world.half_scale()),
            oscillator: Oscillator::new(world, &config.physics),
            camera: CameraSystem::new(&config.camera, config.interactive),
            projector: Projector::fit(size),
            plotter_mode: config.modes.plotter,
            color_mode: config
                .modes
                .color
                .unwrap_or_else(|| ColorMode::default_for(config.render.monochrome)),
            inverted: config.render.inverted,
            monochrome: config.render.monochrome,
            interactive: config.interactive,
            visibility_iterations: world.visibility_iterations,
            terminator_iterations: world.terminator_iterations,
            tick_count: 0,
            dirty: true,
        };

        sim.apply_coverage();
        sim.set_oscillator_mode(config.modes.oscillator, sensor);

        info!(
            "Simulation ready: {}×{} marks, {}×{} screen, modes {}/{}/{}",
            axis.len(),
            axis.len(),
            size.width,
            size.height,
            sim.oscillator.mode(),
            sim.plotter_mode,
            sim.color_mode
        );
        sim
    }

    /// Advance one tick: oscillator, heights, camera, visibility.
    pub fn tick(&mut self, sensor: &mut dyn Sensor) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self.oscillator.advance(self.tick_count, sensor) {
            self.update_distances();
        }
        self.update_heights();
        self.camera.update(self.oscillator.mode(), sensor);
        self.update_visibility();
        self.dirty = true;

        trace!(
            "tick {} source {:?} phase {}",
            self.tick_count,
            self.oscillator.position,
            self.oscillator.angle_phase
        );
    }

    /// Render the current state into `ctx` and clear the dirty flag.
    ///
    /// The projector is refitted first if `ctx` has a different size.
    pub fn draw<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) {
        self.resize(ctx.size());

        let transform = *self.camera.transform();
        let projector = self.projector;
        for lattice in self.lattices_mut() {
            lattice.update_screen(&projector, &transform);
        }

        let ripple = self.oscillator.ripple();
        match self.plotter_mode {
            PlotterMode::Dots => self.draw_dots(ctx),
            PlotterMode::Lines => {
                self.draw_x_lines(ctx, &ripple);
                self.draw_y_lines(ctx, &ripple, true);
            }
            PlotterMode::Grid => {
                self.draw_x_lines(ctx, &ripple);
                self.draw_y_lines(ctx, &ripple, false);
            }
        }

        self.dirty = false;
    }

    fn draw_dots<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        for sample in self.marks.samples().filter(|s| s.visible) {
            ctx.draw_pixel(sample.screen, shade_of(sample));
        }
        for lattice in [&self.x_bisegments, &self.y_bisegments] {
            for i in 0..lattice.cols() {
                for j in 0..lattice.rows() {
                    let sample = lattice.sample(i, j);
                    if sample.visible && lattice.is_border(i, j) {
                        ctx.draw_pixel(sample.screen, shade_of(sample));
                    }
                }
            }
        }
    }

    /// Lines parallel to x, each split at its x-bisegment centre.
    fn draw_x_lines<C: DrawContext + ?Sized>(&self, ctx: &mut C, ripple: &Ripple) {
        for i in 1..self.marks.cols() {
            for j in 0..self.marks.rows() {
                let centre = self.x_bisegments.sample(i - 1, j);
                self.draw_half_segment(ctx, ripple, self.marks.sample(i - 1, j), centre);
                self.draw_half_segment(ctx, ripple, centre, self.marks.sample(i, j));
            }
        }
    }

    /// Lines parallel to y; `border_only` keeps the first and last column.
    fn draw_y_lines<C: DrawContext + ?Sized>(
        &self,
        ctx: &mut C,
        ripple: &Ripple,
        border_only: bool,
    ) {
        let cols = self.marks.cols();
        for i in 0..cols {
            if border_only && i != 0 && i + 1 != cols {
                continue;
            }
            for j in 1..self.marks.rows() {
                let centre = self.y_bisegments.sample(i, j - 1);
                self.draw_half_segment(ctx, ripple, self.marks.sample(i, j - 1), centre);
                self.draw_half_segment(ctx, ripple, centre, self.marks.sample(i, j));
            }
        }
    }

    fn draw_half_segment<C: DrawContext + ?Sized>(
        &self,
        ctx: &mut C,
        ripple: &Ripple,
        a: &LatticeSample,
        b: &LatticeSample,
    ) {
        match (a.visible, b.visible) {
            (false, false) => {}
            (true, true) => {
                ctx.draw_line(a.screen, b.screen, Shade::average(shade_of(a), shade_of(b)))
            }
            _ => {
                let (seen, hidden) = if a.visible { (a, b) } else { (b, a) };
                let edge = solve_terminator(
                    seen.world,
                    hidden.world,
                    self.camera.eye(),
                    ripple,
                    &self.bounds,
                    self.visibility_iterations,
                    self.terminator_iterations,
                )
                .visible;
                let end = self.projector.project(self.camera.transform(), edge);
                let edge_shade = Shade::new(edge.z, ripple.distance_to(edge.x, edge.y));
                ctx.draw_line(seen.screen, end, Shade::average(shade_of(seen), edge_shade));
            }
        }
    }

    /// Recalibrate the projector for a new screen size.
    pub fn resize(&mut self, size: ScreenSize) {
        if size != self.projector.size() {
            debug!("resize to {}×{}", size.width, size.height);
            self.projector = Projector::fit(size);
            self.dirty = true;
        }
    }

    pub fn cycle_color_mode(&mut self) {
        self.color_mode = self.color_mode.next();
        info!("Color mode: {}", self.color_mode);
        self.dirty = true;
    }

    pub fn cycle_plotter_mode(&mut self) {
        self.set_plotter_mode(self.plotter_mode.next());
    }

    pub fn cycle_oscillator_mode(&mut self, sensor: &mut dyn Sensor) {
        self.set_oscillator_mode(self.oscillator.mode().next(), sensor);
    }

    pub fn toggle_inversion(&mut self) {
        self.inverted = !self.inverted;
        info!("Inverted: {}", self.inverted);
        self.dirty = true;
    }

    pub fn apply(&mut self, command: Command, sensor: &mut dyn Sensor) {
        match command {
            Command::CycleColor => self.cycle_color_mode(),
            Command::CyclePlotter => self.cycle_plotter_mode(),
            Command::CycleOscillator => self.cycle_oscillator_mode(sensor),
            Command::ToggleInversion => self.toggle_inversion(),
        }
    }

    /// Change plotter; the clock does not advance but all covered samples are refreshed.
    pub fn set_plotter_mode(&mut self, mode: PlotterMode) {
        self.plotter_mode = mode;
        self.apply_coverage();
        self.refresh_world();
        info!("Plotter mode: {}", mode);
        self.dirty = true;
    }

    pub fn set_oscillator_mode(&mut self, mode: OscillatorMode, sensor: &mut dyn Sensor) {
        self.oscillator.enter(mode, sensor, !self.interactive);
        match mode {
            OscillatorMode::Anchored => self.camera.reset_rotation(),
            OscillatorMode::Floating | OscillatorMode::Bouncing => self.camera.enter_tilted(),
        }
        self.refresh_world();
        info!("Oscillator mode: {}", mode);
        self.dirty = true;
    }

    fn apply_coverage(&mut self) {
        let [marks, xbis, ybis] = coverage_for(self.plotter_mode);
        self.marks.set_coverage(marks);
        self.x_bisegments.set_coverage(xbis);
        self.y_bisegments.set_coverage(ybis);
    }

    fn lattices_mut(&mut self) -> [&mut SampledSurface; 3] {
        [
            &mut self.marks,
            &mut self.x_bisegments,
            &mut self.y_bisegments,
        ]
    }

    fn refresh_world(&mut self) {
        self.update_distances();
        self.update_heights();
        self.update_visibility();
    }

    fn update_distances(&mut self) {
        let center = self.oscillator.position;
        for lattice in self.lattices_mut() {
            lattice.update_distances(center);
        }
    }

    fn update_heights(&mut self) {
        let phase = self.oscillator.angle_phase;
        for lattice in self.lattices_mut() {
            lattice.update_heights(phase);
        }
    }

    fn update_visibility(&mut self) {
        let viewer = self.camera.eye();
        let ripple = self.oscillator.ripple();
        let bounds = self.bounds;
        let iterations = self.visibility_iterations;
        for lattice in self.lattices_mut() {
            lattice.update_visibility(viewer, &ripple, &bounds, iterations);
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.color_mode, self.monochrome, self.inverted)
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.projector.size()
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub fn camera(&self) -> &CameraSystem {
        &self.camera
    }

    pub fn viewer(&self) -> Q3 {
        self.camera.eye()
    }

    pub fn marks(&self) -> &SampledSurface {
        &self.marks
    }

    pub fn x_bisegments(&self) -> &SampledSurface {
        &self.x_bisegments
    }

    pub fn y_bisegments(&self) -> &SampledSurface {
        &self.y_bisegments
    }

    pub fn plotter_mode(&self) -> PlotterMode {
        self.plotter_mode
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}
