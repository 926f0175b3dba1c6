//! The particle field: a fixed-size set of drifting points joined by fading
//! lines whenever two of them are close enough.
//!
//! The field owns its particles, the surface dimensions, and the random
//! source used to (re)spawn them. It never schedules itself; a host calls
//! [`ParticleField::step`] once per animation frame and
//! [`ParticleField::resize`] whenever the drawing surface changes size.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::{DrawCommand, FrameRecorder, Surface};
use rand::Rng;
use vecmath::{vec2_len, vec2_sub};

/// A line produced by the connection pass, between particles `from` and `to`
/// (indices into [`ParticleField::particles`], `from < to`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub opacity: f64,
}

pub struct ParticleField<R> {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    config: FieldConfig,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Builds a field of `count` random particles on a `width` x `height`
    /// surface, using the default look.
    pub fn initialize(width: f64, height: f64, count: usize, rng: R) -> Self {
        ParticleField::with_config(
            FieldConfig::default().with_particle_count(count),
            width,
            height,
            rng,
        )
    }

    pub fn with_config(config: FieldConfig, width: f64, height: f64, rng: R) -> Self {
        let mut field = ParticleField {
            width,
            height,
            particles: Vec::new(),
            config,
            rng,
        };
        field.reinitialize(width, height, config.particle_count);
        field
    }

    /// Builds a field around already placed particles. The configured count
    /// becomes the number of particles given, so later resizes keep it.
    pub fn from_particles(
        config: FieldConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
        rng: R,
    ) -> Self {
        ParticleField {
            width,
            height,
            config: config.with_particle_count(particles.len()),
            particles,
            rng,
        }
    }

    /// Throws away every particle and spawns `count` new ones on a surface of
    /// the given size.
    pub fn reinitialize(&mut self, width: f64, height: f64, count: usize) {
        self.width = width;
        self.height = height;
        self.config.particle_count = count;

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(&mut self.rng, width, height, &self.config));
        }
        self.particles = particles;
    }

    /// Respawns the whole field for a new surface size. Nothing is rescaled
    /// or carried over.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.reinitialize(width, height, self.config.particle_count);
    }
}

impl<R> ParticleField<R> {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Every pair closer than the connection distance, with its line opacity.
    /// Walks all `n * (n - 1) / 2` pairs.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let max_opacity = self.config.max_line_opacity;
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |i| {
            (i + 1..particles.len()).filter_map(move |j| {
                let distance = vec2_len(vec2_sub(particles[i].pos, particles[j].pos));
                if distance < threshold {
                    Some(Connection {
                        from: i,
                        to: j,
                        distance,
                        opacity: max_opacity * (1.0 - distance / threshold),
                    })
                } else {
                    None
                }
            })
        })
    }

    /// Draws one frame and advances the simulation by one tick.
    ///
    /// The surface is cleared, then the connection lines are drawn, then each
    /// particle is drawn at its current position before it moves. Movement is
    /// followed by boundary reflection, which only flips velocity signs.
    pub fn step<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.width, self.height)?;

        let line_color = self.config.line_color;
        let line_width = self.config.line_width;
        for connection in self.connections() {
            surface.line(
                self.particles[connection.from].pos,
                self.particles[connection.to].pos,
                line_color,
                connection.opacity,
                line_width,
            )?;
        }

        let (width, height) = (self.width, self.height);
        let alpha = self.config.particle_alpha;
        for particle in &mut self.particles {
            surface.circle(particle.pos, particle.size, particle.color, alpha)?;
            particle.advance();
            particle.reflect(width, height);
        }
        Ok(())
    }

    /// Runs [`step`](Self::step) against a recorder and hands back the draw
    /// calls it made.
    pub fn frame(&mut self) -> Vec<DrawCommand> {
        let mut recorder = FrameRecorder::new();
        match self.step(&mut recorder) {
            Ok(()) => recorder.into_commands(),
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn placed(width: f64, height: f64, particles: Vec<Particle>) -> ParticleField<StdRng> {
        ParticleField::from_particles(FieldConfig::default(), width, height, particles, rng())
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 1.0, FieldConfig::INDIGO)
    }

    fn lines(commands: &[DrawCommand]) -> Vec<&DrawCommand> {
        commands.iter().filter(|c| c.is_line()).collect()
    }

    #[test]
    fn initialize_spawns_exact_count_within_bounds() {
        let field = ParticleField::initialize(640.0, 480.0, 80, rng());
        assert_eq!(field.len(), 80);
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
            assert!(p.size >= 0.5 && p.size < 2.5);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(field.config().palette.contains(&p.color));
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = ParticleField::initialize(300.0, 200.0, 25, StdRng::seed_from_u64(42));
        let b = ParticleField::initialize(300.0, 200.0, 25, StdRng::seed_from_u64(42));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn resize_replaces_every_particle() {
        let mut field = ParticleField::initialize(100.0, 100.0, 80, rng());
        let before: Vec<[f64; 2]> = field.particles().iter().map(|p| p.pos).collect();

        field.resize(200.0, 150.0);

        assert_eq!(field.len(), 80);
        assert_eq!((field.width(), field.height()), (200.0, 150.0));
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 200.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 150.0);
            assert!(!before.contains(&p.pos));
        }
    }

    #[test]
    fn reinitialize_changes_count() {
        let mut field = ParticleField::initialize(100.0, 100.0, 10, rng());
        field.reinitialize(50.0, 50.0, 3);
        assert_eq!(field.len(), 3);
        field.resize(60.0, 60.0);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn frame_is_clear_then_lines_then_circles() {
        let mut field = ParticleField::initialize(200.0, 200.0, 12, rng());
        for _ in 0..3 {
            let commands = field.frame();
            assert_eq!(commands[0], DrawCommand::Clear { width: 200.0, height: 200.0 });
            let first_circle = commands
                .iter()
                .position(|c| c.is_circle())
                .expect("particles are drawn");
            assert!(commands[1..first_circle].iter().all(|c| c.is_line()));
            assert!(commands[first_circle..].iter().all(|c| c.is_circle()));
            assert_eq!(commands.len() - first_circle, 12);
        }
    }

    #[test]
    fn close_pair_gets_one_faded_line() {
        let mut field = placed(100.0, 100.0, vec![still(10.0, 10.0), still(10.0, 15.0)]);
        let commands = field.frame();
        let lines = lines(&commands);
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCommand::Line { from, to, alpha, width, color } => {
                assert_eq!(*from, [10.0, 10.0]);
                assert_eq!(*to, [10.0, 15.0]);
                assert!((alpha - 0.1 * (1.0 - 5.0 / 180.0)).abs() < 1e-12);
                assert!((alpha - 0.0972).abs() < 1e-4);
                assert_eq!(*width, 0.3);
                assert_eq!(*color, FieldConfig::INDIGO);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn threshold_distance_draws_nothing() {
        let mut field = placed(400.0, 400.0, vec![still(0.0, 0.0), still(180.0, 0.0)]);
        assert_eq!(field.connections().count(), 0);
        assert!(lines(&field.frame()).is_empty());
    }

    #[test]
    fn coincident_particles_get_max_opacity() {
        let field = placed(100.0, 100.0, vec![still(5.0, 5.0), still(5.0, 5.0)]);
        let connections: Vec<Connection> = field.connections().collect();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].distance, 0.0);
        assert_eq!(connections[0].opacity, 0.1);
    }

    #[test]
    fn line_opacity_follows_configured_maximum() {
        let config = FieldConfig::default().with_max_line_opacity(0.5);
        let mut field = ParticleField::from_particles(
            config,
            100.0,
            100.0,
            vec![still(0.0, 0.0), still(90.0, 0.0)],
            rng(),
        );
        match lines(&field.frame())[0] {
            DrawCommand::Line { alpha, .. } => assert!((alpha - 0.25).abs() < 1e-12),
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn spawned_colors_come_from_configured_palette() {
        let red = Color::from_u32(0xff0000ff);
        let green = Color::from_u32(0x00ff00ff);
        let config = FieldConfig::default()
            .with_particle_count(50)
            .with_palette([red, green]);
        let field = ParticleField::with_config(config, 100.0, 100.0, rng());
        assert_eq!(field.len(), 50);
        for p in field.particles() {
            assert!(p.color == red || p.color == green);
        }
    }

    #[test]
    fn connections_visit_each_pair_once() {
        let field = placed(
            100.0,
            100.0,
            vec![still(1.0, 1.0), still(2.0, 2.0), still(3.0, 3.0), still(99.0, 99.0)],
        );
        let pairs: Vec<(usize, usize)> = field.connections().map(|c| (c.from, c.to)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn particle_renders_before_moving_and_bounces() {
        let particle = Particle::new(99.9, 50.0, 0.2, 0.0, 1.0, FieldConfig::PURPLE);
        let mut field = placed(100.0, 100.0, vec![particle]);

        let commands = field.frame();
        let circles: Vec<&DrawCommand> = commands.iter().filter(|c| c.is_circle()).collect();
        assert_eq!(circles.len(), 1);
        assert_eq!(
            *circles[0],
            DrawCommand::Circle {
                center: [99.9, 50.0],
                radius: 1.0,
                color: FieldConfig::PURPLE,
                alpha: 0.4,
            }
        );
        let moved = field.particles()[0];
        assert!(moved.pos[0] > 100.0);
        assert_eq!(moved.vel[0], -0.2);

        field.frame();
        assert!(field.particles()[0].pos[0] < moved.pos[0]);
    }

    #[test]
    fn empty_field_only_clears() {
        let mut field = ParticleField::initialize(100.0, 100.0, 0, rng());
        assert!(field.is_empty());
        assert_eq!(field.frame(), vec![DrawCommand::Clear { width: 100.0, height: 100.0 }]);
    }

    #[test]
    fn zero_sized_surface_still_steps() {
        let mut field = ParticleField::initialize(0.0, 0.0, 4, rng());
        for p in field.particles() {
            assert_eq!(p.pos, [0.0, 0.0]);
        }
        let commands = field.frame();
        // all pairs coincide, so every line is at full opacity
        let lines = lines(&commands);
        assert_eq!(lines.len(), 6);
        for line in lines {
            if let DrawCommand::Line { alpha, .. } = line {
                assert_eq!(*alpha, 0.1);
            }
        }
    }
}
