//! JSON configuration for streaming simulations

use crate::error::{Result, StreamingError};
use crate::grid::Grid;
use crate::params::StreamingParams;
use ndarray::{Array1, Ix2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Complete run configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Physical parameters
    pub flow: FlowConfig,
    /// Radial sampling of the amplitudes
    #[serde(default)]
    pub radial: RadialConfig,
    /// Evaluation grid
    #[serde(default)]
    pub grid: GridConfig,
    /// Time sweep
    #[serde(default)]
    pub time: TimeConfig,
    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
    /// Simulation metadata
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Physical parameters (ε, Re)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Oscillation amplitude over cylinder radius
    pub epsilon: f64,
    /// Scaled Reynolds number ω a² / ν
    pub reynolds: f64,
}

impl FlowConfig {
    /// Build the parameter bundle
    pub fn to_params(&self) -> Result<StreamingParams> {
        StreamingParams::new(self.epsilon, self.reynolds)
    }
}

/// Spacing of the radial samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialSpacing {
    /// Equal steps in r
    Uniform,
    /// Equal steps in ln r, clustering samples in the Stokes layer
    Geometric,
}

/// Radial sampling from the surface r = 1 to `r_max`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadialConfig {
    /// Outer radius of the samples
    #[serde(default = "default_r_max")]
    pub r_max: f64,
    /// Number of samples
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Sample spacing
    #[serde(default = "default_radial_spacing")]
    pub spacing: RadialSpacing,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            r_max: default_r_max(),
            samples: default_samples(),
            spacing: default_radial_spacing(),
        }
    }
}

fn default_r_max() -> f64 {
    20.0
}

fn default_samples() -> usize {
    2000
}

fn default_radial_spacing() -> RadialSpacing {
    RadialSpacing::Geometric
}

impl RadialConfig {
    /// Radial samples, first exactly 1 and last exactly `r_max`
    pub fn generate_samples(&self) -> Array1<f64> {
        let n = self.samples;
        let mut r = match self.spacing {
            RadialSpacing::Uniform => Array1::linspace(1.0, self.r_max, n),
            RadialSpacing::Geometric => Array1::geomspace(1.0, self.r_max, n)
                .unwrap_or_else(|| Array1::linspace(1.0, self.r_max, n)),
        };
        if n > 0 {
            r[0] = 1.0;
            r[n - 1] = self.r_max;
        }
        r
    }
}

/// Evaluation grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GridConfig {
    #[serde(rename = "polar")]
    /// Polar tensor grid, Θ uniform over [0, 2π)
    Polar {
        /// Innermost radius (≥ 1)
        r_min: f64,
        /// Outermost radius
        r_max: f64,
        /// Number of radii
        nr: usize,
        /// Number of angles
        ntheta: usize,
    },
    #[serde(rename = "cartesian")]
    /// Cartesian tensor grid; every point must lie outside the cylinder
    Cartesian {
        /// Smallest x
        x_min: f64,
        /// Largest x
        x_max: f64,
        /// Number of x values
        nx: usize,
        /// Smallest y
        y_min: f64,
        /// Largest y
        y_max: f64,
        /// Number of y values
        ny: usize,
    },
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig::Polar {
            r_min: 1.0,
            r_max: 5.0,
            nr: 41,
            ntheta: 64,
        }
    }
}

impl GridConfig {
    /// Build the grid
    pub fn to_grid(&self) -> Result<Grid<Ix2>> {
        match *self {
            GridConfig::Polar {
                r_min,
                r_max,
                nr,
                ntheta,
            } => {
                let rs = Array1::linspace(r_min, r_max, nr);
                let thetas =
                    Array1::from_shape_fn(ntheta, |j| 2.0 * PI * j as f64 / ntheta as f64);
                Grid::polar(&rs, &thetas)
            }
            GridConfig::Cartesian {
                x_min,
                x_max,
                nx,
                y_min,
                y_max,
                ny,
            } => Grid::meshgrid(
                &Array1::linspace(x_min, x_max, nx),
                &Array1::linspace(y_min, y_max, ny),
            ),
        }
    }

    /// Number of grid points
    pub fn num_points(&self) -> usize {
        match *self {
            GridConfig::Polar { nr, ntheta, .. } => nr * ntheta,
            GridConfig::Cartesian { nx, ny, .. } => nx * ny,
        }
    }
}

/// Time sweep over `steps` equally spaced instants in [start, end)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeConfig {
    /// First instant
    #[serde(default)]
    pub start: f64,
    /// End of the sweep (excluded)
    #[serde(default = "default_time_end")]
    pub end: f64,
    /// Number of instants
    #[serde(default = "default_time_steps")]
    pub steps: usize,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: default_time_end(),
            steps: default_time_steps(),
        }
    }
}

fn default_time_end() -> f64 {
    2.0 * PI
}

fn default_time_steps() -> usize {
    16
}

impl TimeConfig {
    /// The instants of the sweep
    pub fn generate_times(&self) -> Vec<f64> {
        let dt = (self.end - self.start) / self.steps as f64;
        (0..self.steps).map(|k| self.start + k as f64 * dt).collect()
    }
}

/// Output options
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Also write Cartesian velocity components
    #[serde(default = "default_cartesian_velocity")]
    pub cartesian_velocity: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cartesian_velocity: default_cartesian_velocity(),
        }
    }
}

fn default_cartesian_velocity() -> bool {
    true
}

/// Simulation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Simulation description
    #[serde(default)]
    pub description: String,
    /// Simulation date
    #[serde(default)]
    pub date: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl StreamingConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: StreamingConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(StreamingError::InvalidConfig(msg)) };

        if !self.flow.epsilon.is_finite() {
            return invalid(format!("flow.epsilon must be finite, got {}", self.flow.epsilon));
        }
        if !(self.flow.reynolds.is_finite() && self.flow.reynolds > 0.0) {
            return invalid(format!("flow.reynolds must be > 0, got {}", self.flow.reynolds));
        }
        if !(self.radial.r_max.is_finite() && self.radial.r_max > 1.0) {
            return invalid(format!("radial.r_max must be > 1, got {}", self.radial.r_max));
        }
        if self.radial.samples < 3 {
            return invalid(format!(
                "radial.samples must be at least 3, got {}",
                self.radial.samples
            ));
        }
        if self.time.steps == 0 {
            return invalid("time.steps must be at least 1".to_string());
        }
        if !(self.time.start.is_finite() && self.time.end.is_finite()) {
            return invalid("time.start and time.end must be finite".to_string());
        }

        match self.grid {
            GridConfig::Polar {
                r_min,
                r_max,
                nr,
                ntheta,
            } => {
                if nr == 0 || ntheta == 0 {
                    return invalid("grid.nr and grid.ntheta must be positive".to_string());
                }
                if !(r_min >= 1.0 && r_max >= r_min) {
                    return invalid(format!(
                        "grid radii must satisfy 1 <= r_min <= r_max, got [{}, {}]",
                        r_min, r_max
                    ));
                }
            }
            GridConfig::Cartesian { nx, ny, .. } => {
                if nx == 0 || ny == 0 {
                    return invalid("grid.nx and grid.ny must be positive".to_string());
                }
            }
        }

        let grid = self.grid.to_grid()?;
        if let Some((lo, hi)) = grid.radius_range() {
            if lo < 1.0 - 1e-12 || hi > self.radial.r_max * (1.0 + 1e-12) {
                return invalid(format!(
                    "grid radii [{:.4}, {:.4}] must lie within the radial samples [1, {}]",
                    lo, hi, self.radial.r_max
                ));
            }
        }

        Ok(())
    }

    /// Built-in configuration used when no file is given
    pub fn default_config() -> Self {
        Self {
            flow: FlowConfig {
                epsilon: 0.1,
                reynolds: 10.0,
            },
            radial: RadialConfig::default(),
            grid: GridConfig::default(),
            time: TimeConfig::default(),
            output: OutputConfig::default(),
            metadata: MetadataConfig {
                description: "Streaming around an oscillating cylinder".to_string(),
                ..MetadataConfig::default()
            },
        }
    }
}

/// Print configuration summary to stdout
pub fn print_config_summary(config: &StreamingConfig) {
    println!("\n=== Configuration Summary ===");
    println!(
        "Flow: eps = {}, Re = {} (Stokes layer ~ {:.3} radii)",
        config.flow.epsilon,
        config.flow.reynolds,
        (2.0 / config.flow.reynolds).sqrt()
    );
    println!(
        "Radial samples: {} on [1, {}] ({:?})",
        config.radial.samples, config.radial.r_max, config.radial.spacing
    );
    match config.grid {
        GridConfig::Polar {
            r_min,
            r_max,
            nr,
            ntheta,
        } => println!(
            "Grid: polar r in [{}, {}] ({} radii) x {} angles",
            r_min, r_max, nr, ntheta
        ),
        GridConfig::Cartesian {
            x_min,
            x_max,
            nx,
            y_min,
            y_max,
            ny,
        } => println!(
            "Grid: cartesian x in [{}, {}] ({}) x y in [{}, {}] ({})",
            x_min, x_max, nx, y_min, y_max, ny
        ),
    }
    println!(
        "Time: {} steps on [{:.3}, {:.3})",
        config.time.steps, config.time.start, config.time.end
    );
}
