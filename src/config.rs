// Tunable constants for the particle field. Defaults reproduce the landing page background

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Pairs closer than this (strictly) are joined by a line.
    pub connection_distance: f64,
    /// Line alpha at distance 0, fading linearly to 0 at `connection_distance`.
    pub max_line_opacity: f64,
    pub line_width: f64,
    pub line_color: Color,
    pub palette: [Color; 2],
    pub particle_alpha: f64,
    /// Sizes are drawn from `[min_size, min_size + size_range)`.
    pub min_size: f64,
    pub size_range: f64,
    /// Each speed component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
}

impl FieldConfig {
    pub const DEFAULT_PARTICLE_COUNT: usize = 80;
    pub const DEFAULT_CONNECTION_DISTANCE: f64 = 180.0;
    pub const DEFAULT_MAX_LINE_OPACITY: f64 = 0.1;
    pub const INDIGO: Color = Color::from_u32(0x6366f1ff);
    pub const PURPLE: Color = Color::from_u32(0xa855f7ff);

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_connection_distance(mut self, connection_distance: f64) -> Self {
        self.connection_distance = connection_distance;
        self
    }

    pub fn with_max_line_opacity(mut self, max_line_opacity: f64) -> Self {
        self.max_line_opacity = max_line_opacity;
        self
    }

    pub fn with_palette(mut self, palette: [Color; 2]) -> Self {
        self.palette = palette;
        self
    }

    pub fn max_size(&self) -> f64 {
        self.min_size + self.size_range
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::DEFAULT_PARTICLE_COUNT,
            connection_distance: FieldConfig::DEFAULT_CONNECTION_DISTANCE,
            max_line_opacity: FieldConfig::DEFAULT_MAX_LINE_OPACITY,
            line_width: 0.3,
            line_color: FieldConfig::INDIGO,
            palette: [FieldConfig::INDIGO, FieldConfig::PURPLE],
            particle_alpha: 0.4,
            min_size: 0.5,
            size_range: 2.0,
            max_speed: 0.25,
        }
    }
}
