use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::shapes::ShapeKind;

/// Scene configuration, loaded from a YAML or JSON file. Every field has a
/// default so an empty document is a valid scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default)]
    pub canvas: Resolution,
    #[serde(default = "default_dots")]
    pub dots: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub shape: ShapeKind,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: f64,
    #[serde(default)]
    pub depth_band: DepthBand,
    #[serde(default)]
    pub fast_mode: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Resolution::default(),
            dots: default_dots(),
            seed: 0,
            shape: ShapeKind::default(),
            fps: default_fps(),
            transition_ms: default_transition_ms(),
            depth_band: DepthBand::default(),
            fast_mode: false,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            bail!(
                "canvas must be positive, got {}x{}",
                self.canvas.width,
                self.canvas.height
            );
        }

        if self.dots == 0 {
            bail!("dots must be > 0");
        }

        if self.fps == 0 {
            bail!("fps must be > 0");
        }

        if !self.transition_ms.is_finite() || self.transition_ms <= 0.0 {
            bail!("transition_ms must be > 0, got {}", self.transition_ms);
        }

        self.depth_band.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
        }
    }
}

/// Clamp band applied to the sampled depth before it drives stroke width
/// and opacity. Narrowing the band flattens the depth emphasis.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepthBand {
    pub min: f64,
    pub max: f64,
}

impl Default for DepthBand {
    fn default() -> Self {
        Self { min: 0.4, max: 1.2 }
    }
}

impl DepthBand {
    fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            bail!("depth_band bounds must be finite");
        }
        if self.min < 0.0 {
            bail!("depth_band.min must be >= 0, got {}", self.min);
        }
        if self.min >= self.max {
            bail!(
                "depth_band.min must be below depth_band.max, got [{}, {}]",
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

fn default_dots() -> usize {
    12
}

fn default_fps() -> u32 {
    60
}

fn default_transition_ms() -> f64 {
    2000.0
}

/// Loads and validates a scene config, dispatching on the file extension.
pub fn load_config(path: &Path) -> Result<SceneConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or("");
    let config: SceneConfig = match extension {
        "yaml" | "yml" => serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid YAML config {}", path.display()))?,
        "json" => serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON config {}", path.display()))?,
        other => bail!("unsupported config extension '{other}' (expected yaml, yml, or json)"),
    };

    config.validate()?;
    Ok(config)
}
