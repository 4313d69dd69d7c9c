use serde::Deserialize;

/// Every skeleton is exactly this many control points. The sampler walks the
/// ring proportionally to elapsed time, so the count is part of the motion
/// model, not just a resolution knob.
pub const SKELETON_POINTS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Sphere,
    Torus,
    Spiral,
    Wave,
    Cross,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Spiral,
        ShapeKind::Wave,
        ShapeKind::Cross,
    ];

    /// Cyclic successor used by the shape-switch cycle.
    pub fn successor(self) -> ShapeKind {
        let index = Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
            ShapeKind::Spiral => "spiral",
            ShapeKind::Wave => "wave",
            ShapeKind::Cross => "cross",
        }
    }

    /// Default pen color parameters for this shape family.
    pub fn default_scheme(self) -> ColorScheme {
        match self {
            ShapeKind::Sphere => ColorScheme {
                hue: 200.0,
                hue_range: 40.0,
                saturation: 70.0,
                lightness: 50.0,
            },
            ShapeKind::Torus => ColorScheme {
                hue: 280.0,
                hue_range: 30.0,
                saturation: 60.0,
                lightness: 45.0,
            },
            ShapeKind::Spiral => ColorScheme {
                hue: 120.0,
                hue_range: 40.0,
                saturation: 65.0,
                lightness: 40.0,
            },
            ShapeKind::Wave => ColorScheme {
                hue: 180.0,
                hue_range: 30.0,
                saturation: 75.0,
                lightness: 55.0,
            },
            ShapeKind::Cross => ColorScheme {
                hue: 340.0,
                hue_range: 20.0,
                saturation: 80.0,
                lightness: 50.0,
            },
        }
    }
}

/// Hue in degrees, saturation/lightness in percent. `hue_range` is the full
/// spread an agent may wander around `hue`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub hue: f64,
    pub hue_range: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Per-agent copy of the full scheme table. Agents may retune their own
/// table (pen randomization) without affecting anyone else.
#[derive(Debug, Clone)]
pub struct SchemeTable {
    schemes: [ColorScheme; ShapeKind::ALL.len()],
}

impl Default for SchemeTable {
    fn default() -> Self {
        Self {
            schemes: ShapeKind::ALL.map(ShapeKind::default_scheme),
        }
    }
}

impl SchemeTable {
    pub fn get(&self, kind: ShapeKind) -> ColorScheme {
        self.schemes[Self::index(kind)]
    }

    pub fn get_mut(&mut self, kind: ShapeKind) -> &mut ColorScheme {
        &mut self.schemes[Self::index(kind)]
    }

    fn index(kind: ShapeKind) -> usize {
        ShapeKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or(0)
    }
}

type Generator = fn(f64) -> Vec<ControlPoint>;

fn generator_for(kind: ShapeKind) -> Generator {
    match kind {
        ShapeKind::Sphere => sphere,
        ShapeKind::Torus => torus,
        ShapeKind::Spiral => spiral,
        ShapeKind::Wave => wave,
        ShapeKind::Cross => cross,
    }
}

/// Builds a fresh 12-point skeleton. Pure: identical `kind` and `radius`
/// always produce the identical point sequence, and every coordinate scales
/// linearly with `radius`.
pub fn generate(kind: ShapeKind, radius: f64) -> Vec<ControlPoint> {
    generator_for(kind)(radius)
}

fn sphere(radius: f64) -> Vec<ControlPoint> {
    // Not a true sphere surface: y oscillates at double frequency for a
    // figure-eight vertical sweep.
    (0..SKELETON_POINTS)
        .map(|i| {
            let phi = (i as f64 / SKELETON_POINTS as f64) * std::f64::consts::TAU;
            ControlPoint {
                x: radius * phi.cos(),
                y: radius * (phi * 2.0).sin() * 0.5,
                z: radius * phi.sin() * 0.5,
            }
        })
        .collect()
}

fn torus(radius: f64) -> Vec<ControlPoint> {
    let tube_radius = radius * 0.3;
    (0..SKELETON_POINTS)
        .map(|i| {
            let theta = (i as f64 / SKELETON_POINTS as f64) * std::f64::consts::TAU;
            let ring = radius + tube_radius * (theta * 4.0).cos();
            ControlPoint {
                x: ring * theta.cos(),
                y: ring * theta.sin(),
                z: tube_radius * (theta * 4.0).sin(),
            }
        })
        .collect()
}

fn spiral(radius: f64) -> Vec<ControlPoint> {
    (0..SKELETON_POINTS)
        .map(|i| {
            let fraction = i as f64 / SKELETON_POINTS as f64;
            let t = fraction * std::f64::consts::PI * 4.0;
            let scale = 1.0 - fraction * 0.8;
            ControlPoint {
                x: radius * scale * t.cos(),
                y: radius * scale * t.sin(),
                z: radius * fraction - radius / 2.0,
            }
        })
        .collect()
}

fn wave(radius: f64) -> Vec<ControlPoint> {
    (0..SKELETON_POINTS)
        .map(|i| {
            let t = (i as f64 / SKELETON_POINTS as f64) * std::f64::consts::TAU;
            ControlPoint {
                x: radius * t.cos(),
                y: radius * t.sin(),
                z: radius * (t * 4.0).sin() * 0.5,
            }
        })
        .collect()
}

fn cross(radius: f64) -> Vec<ControlPoint> {
    // Four 3-point arms: top, right, bottom, left. Within an arm the point
    // interpolates between the tip and the center along a single axis.
    (0..SKELETON_POINTS)
        .map(|i| {
            let segment = i / 3;
            let fraction = (i % 3) as f64 / 2.0;
            let (x, y) = match segment {
                0 => (0.0, radius * (1.0 - fraction)),
                1 => (radius * fraction, 0.0),
                2 => (0.0, -radius * fraction),
                _ => (-radius * (1.0 - fraction), 0.0),
            };
            ControlPoint { x, y, z: 0.0 }
        })
        .collect()
}
