//! Scrolling heightfield: the endless synthwave floor.
//!
//! The grid is created once and keeps its topology for the whole session.
//! Each frame every vertex gets a new height and color, then the lattice
//! slides toward the viewer by a fixed step. Rows that fall off the near
//! edge re-enter at the far edge, keeping their spacing, and the far rows
//! are pinned to a black, flat horizon to hide the seam.

use crate::color::{ColorTheme, BLACK};
use crate::constants::*;
use crate::noise::{NoiseField, OctaveParams};
use crate::spectrum::bin_at;
use smallvec::SmallVec;
use std::f32::consts::PI;

#[derive(Clone, Debug, PartialEq)]
pub struct TerrainConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub scroll_step: f32,
    pub wrap_min_y: f32,
    pub wrap_span: f32,
    pub horizon_y: f32,
    pub road_proportion: f32,
    pub road_falloff_rate: f32,
    pub road_falloff_bias: f32,
    pub height_scale: f32,
    pub noise_scale: f32,
    pub noise_tile: u32,
    pub spectral_offset: usize,
    pub spectral_gain: f32,
    pub octaves: OctaveParams,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: TERRAIN_WIDTH,
            height: TERRAIN_HEIGHT,
            width_segments: TERRAIN_SEGMENTS,
            height_segments: TERRAIN_SEGMENTS,
            scroll_step: SCROLL_STEP,
            wrap_min_y: WRAP_MIN_Y,
            wrap_span: WRAP_SPAN,
            horizon_y: HORIZON_Y,
            road_proportion: ROAD_PROPORTION,
            road_falloff_rate: ROAD_FALLOFF_RATE,
            road_falloff_bias: ROAD_FALLOFF_BIAS,
            height_scale: HEIGHT_SCALE,
            noise_scale: NOISE_SCALE,
            noise_tile: NOISE_TILE,
            spectral_offset: SPECTRAL_OFFSET,
            spectral_gain: SPECTRAL_GAIN,
            octaves: OctaveParams::default(),
        }
    }
}

impl TerrainConfig {
    #[inline]
    pub fn columns(&self) -> usize {
        self.width_segments as usize + 1
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.height_segments as usize + 1
    }

    /// Half-width of the carved road band.
    #[inline]
    pub fn road_half_width(&self) -> f32 {
        self.width * self.road_proportion
    }

    /// Multiplier applied to a vertex height at lateral position `x`.
    ///
    /// Outside the road the terrain follows `max(|sin(pi x / w)|, 0.5)`;
    /// inside it is additionally pressed down by an exponential that tends
    /// toward zero at the centerline without reaching it.
    pub fn road_factor(&self, x: f32) -> f32 {
        let sin_height = (PI * x / self.width).sin().abs();
        let mut factor = sin_height.max(SIN_HEIGHT_FLOOR);
        let half = self.road_half_width();
        let ax = x.abs();
        if ax < half {
            factor *= (self.road_falloff_rate * (ax - half)).exp() + self.road_falloff_bias;
        }
        factor
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Which terrain layers the renderer should draw. Both may be on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerVisibility {
    pub grid: bool,
    pub faces: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            grid: true,
            faces: true,
        }
    }
}

/// Fixed-topology lattice of `(width_segments+1) x (height_segments+1)`
/// vertices. Row 0 is the far edge (`y = +height/2`).
pub struct TerrainGrid {
    columns: usize,
    rows: usize,
    vertices: Vec<TerrainVertex>,
    triangle_indices: Vec<u32>,
    line_indices: Vec<u32>,
}

impl TerrainGrid {
    pub fn new(config: &TerrainConfig) -> Self {
        let columns = config.columns();
        let rows = config.rows();
        let seg_w = config.width / config.width_segments.max(1) as f32;
        let seg_h = config.height / config.height_segments.max(1) as f32;
        let half_w = config.width / 2.0;
        let half_h = config.height / 2.0;

        let mut vertices = Vec::with_capacity(columns * rows);
        for r in 0..rows {
            for c in 0..columns {
                vertices.push(TerrainVertex {
                    position: [c as f32 * seg_w - half_w, half_h - r as f32 * seg_h, 0.0],
                    color: BLACK,
                });
            }
        }

        let mut triangle_indices = Vec::with_capacity((columns - 1) * (rows - 1) * 6);
        let mut line_indices = Vec::with_capacity(columns * rows * 4);
        for r in 0..rows {
            for c in 0..columns {
                let i = (c + r * columns) as u32;
                let right = i + 1;
                let below = i + columns as u32;
                if c + 1 < columns {
                    line_indices.extend_from_slice(&[i, right]);
                }
                if r + 1 < rows {
                    line_indices.extend_from_slice(&[i, below]);
                }
                if c + 1 < columns && r + 1 < rows {
                    let below_right = below + 1;
                    triangle_indices.extend_from_slice(&[i, below, right, below, below_right, right]);
                }
            }
        }

        Self {
            columns,
            rows,
            vertices,
            triangle_indices,
            line_indices,
        }
    }

    #[inline]
    pub fn index(&self, column: usize, row: usize) -> usize {
        column + row * self.columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn vertex(&self, column: usize, row: usize) -> &TerrainVertex {
        &self.vertices[self.index(column, row)]
    }

    /// Faces layer, counter-clockwise seen from +z.
    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    /// Grid layer as a line list.
    pub fn line_indices(&self) -> &[u32] {
        &self.line_indices
    }
}

/// Vertex indices that wrapped from the near edge during one `advance`.
#[derive(Clone, Debug, Default)]
pub struct AdvanceReport {
    pub wrapped: SmallVec<[u32; 64]>,
}

pub struct TerrainSynthesizer {
    config: TerrainConfig,
    grid: TerrainGrid,
    layers: LayerVisibility,
    frames: u64,
}

impl TerrainSynthesizer {
    pub fn new(config: TerrainConfig) -> Self {
        let grid = TerrainGrid::new(&config);
        log::info!(
            "[terrain] {}x{} vertices over {}x{}",
            grid.columns(),
            grid.rows(),
            config.width,
            config.height
        );
        Self {
            config,
            grid,
            layers: LayerVisibility::default(),
            frames: 0,
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Height of the vertex at lattice cell `(column, row)` and lateral
    /// position `x` for this frame's spectrum. Does not read any other
    /// vertex, so the pass can be split freely.
    pub fn synthesize_height(
        &self,
        column: usize,
        row: usize,
        x: f32,
        energies: &[u8],
        noise: &NoiseField,
    ) -> f32 {
        let cfg = &self.config;
        let tile = cfg.noise_tile.max(1) as usize;
        let nx = (column % tile) as f32 * cfg.noise_scale;
        let ny = (row % tile) as f32 * cfg.noise_scale;
        let mut z = noise.octave_noise(nx, ny, &cfg.octaves) + HEIGHT_BIAS;
        z *= HEIGHT_GAIN;

        let span = cfg.height_segments as usize;
        let near = bin_at(energies, row + cfg.spectral_offset);
        let mirrored = bin_at(energies, span.saturating_sub(row) + cfg.spectral_offset);
        z += (near + mirrored) * cfg.spectral_gain;

        z *= cfg.road_factor(x);
        z *= cfg.height_scale;
        if z.is_finite() {
            z
        } else {
            0.0
        }
    }

    /// Run one frame over every vertex: height, color, scroll, wrap.
    pub fn advance(
        &mut self,
        energies: &[u8],
        noise: &NoiseField,
        theme: &ColorTheme,
    ) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let columns = self.grid.columns;
        let rows = self.grid.rows;
        for row in 0..rows {
            for column in 0..columns {
                let i = column + row * columns;
                let [x, _, _] = self.grid.vertices[i].position;
                let z = self.synthesize_height(column, row, x, energies, noise);

                let cfg = &self.config;
                let v = &mut self.grid.vertices[i];
                v.position[2] = z;
                v.color = theme.color_for_height(z);

                let mut y = v.position[1] - cfg.scroll_step;
                if y < cfg.wrap_min_y {
                    y += cfg.wrap_span;
                    report.wrapped.push(i as u32);
                }
                v.position[1] = y;

                if y >= cfg.horizon_y {
                    v.position[2] = 0.0;
                    v.color = BLACK;
                }
            }
        }
        self.frames += 1;
        report
    }

    /// Repaint every vertex from its current height. Horizon rows stay black.
    pub fn recolor(&mut self, theme: &ColorTheme) {
        let horizon = self.config.horizon_y;
        for v in &mut self.grid.vertices {
            v.color = if v.position[1] >= horizon {
                BLACK
            } else {
                theme.color_for_height(v.position[2])
            };
        }
    }

    /// Apply a layer toggle. Any change triggers a full repaint so no layer
    /// ever shows colors from before the toggle. Returns whether it repainted.
    pub fn set_layers(&mut self, layers: LayerVisibility, theme: &ColorTheme) -> bool {
        if layers == self.layers {
            return false;
        }
        log::debug!(
            "[terrain] layers grid={} faces={}, repainting",
            layers.grid,
            layers.faces
        );
        self.layers = layers;
        self.recolor(theme);
        true
    }
}
