use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::{Resource, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_physics_dt() -> f64 {
    0.01
}
const fn default_gravity() -> [f32; 3] {
    [0.0, 0.0, -9.81]
}
const fn default_contact_natural_frequency() -> f32 {
    30.0
}
const fn default_contact_damping_ratio() -> f32 {
    5.0
}
const fn default_allowed_linear_error() -> f32 {
    0.001
}
const fn default_max_corrective_velocity() -> f32 {
    10.0
}
const fn default_extents() -> [f32; 3] {
    [0.04, 0.2, 0.5]
}
const fn default_tile_mass() -> f32 {
    0.1
}
const fn default_spacing() -> f32 {
    0.2
}
const fn default_axis() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}
const fn default_origin() -> [f32; 3] {
    [-4.0, 0.0, 0.25]
}
const fn default_linear_damping() -> f32 {
    0.05
}
const fn default_topple_impulse() -> [f32; 3] {
    [0.08, 0.0, 0.0]
}
const fn default_true() -> bool {
    true
}
const fn default_friction() -> f32 {
    1.0
}
const fn default_max_contacts() -> usize {
    20
}
const fn default_sleep_linear_threshold() -> f32 {
    0.01
}
const fn default_sleep_angular_threshold() -> f32 {
    0.01
}
const fn default_settle_steps() -> u32 {
    50
}
const fn default_azimuth() -> f32 {
    -FRAC_PI_2
}
const fn default_elevation() -> f32 {
    1.25
}
const fn default_distance() -> f32 {
    9.0
}
const fn default_rotate_speed() -> f32 {
    2.0
}
const fn default_zoom_factor() -> f32 {
    1.5
}
const fn default_pan_step() -> f32 {
    0.1
}
const fn default_window_size() -> [u32; 2] {
    [700, 500]
}
fn default_title() -> String {
    "Falling Dominoes".into()
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// World-level physics parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed physics timestep in seconds (default: 0.01 = 100 Hz).
    #[serde(default = "default_physics_dt")]
    pub physics_dt: f64,

    /// Gravity vector [x, y, z] in m/s^2. The world is Z-up.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],

    /// Contact spring natural frequency (Hz). Together with the damping
    /// ratio this is the solver's softness (ERP/CFM) knob.
    #[serde(default = "default_contact_natural_frequency")]
    pub contact_natural_frequency: f32,

    /// Contact spring damping ratio.
    #[serde(default = "default_contact_damping_ratio")]
    pub contact_damping_ratio: f32,

    /// Penetration tolerated before correction kicks in (contact layer), metres.
    #[serde(default = "default_allowed_linear_error")]
    pub allowed_linear_error: f32,

    /// Upper bound on the velocity used to resolve penetrations, m/s.
    #[serde(default = "default_max_corrective_velocity")]
    pub max_corrective_velocity: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics_dt: default_physics_dt(),
            gravity: default_gravity(),
            contact_natural_frequency: default_contact_natural_frequency(),
            contact_damping_ratio: default_contact_damping_ratio(),
            allowed_linear_error: default_allowed_linear_error(),
            max_corrective_velocity: default_max_corrective_velocity(),
        }
    }
}

impl SimConfig {
    /// Physics timestep as `f32`, the precision the engine runs at.
    #[allow(clippy::cast_possible_truncation)]
    pub fn dt(&self) -> f32 {
        self.physics_dt as f32
    }

    /// Physics rate in Hz.
    pub fn physics_hz(&self) -> f64 {
        1.0 / self.physics_dt
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

// ---------------------------------------------------------------------------
// TileConfig
// ---------------------------------------------------------------------------

/// Shape, mass and layout of the domino row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    /// Full box extents [width, depth, height] in metres. Width runs along
    /// the layout axis, height along +Z.
    #[serde(default = "default_extents")]
    pub extents: [f32; 3],

    /// Total mass of one tile in kg, spread uniformly over the box.
    #[serde(default = "default_tile_mass")]
    pub mass: f32,

    /// Distance between consecutive tile centres, metres.
    #[serde(default = "default_spacing")]
    pub spacing: f32,

    /// Direction of the row. Normalized on use.
    #[serde(default = "default_axis")]
    pub axis: [f32; 3],

    /// Centre of tile 0.
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],

    #[serde(default = "default_linear_damping")]
    pub linear_damping: f32,

    /// Impulse (N·s) applied at the top edge of tile 0 by the topple command.
    #[serde(default = "default_topple_impulse")]
    pub topple_impulse: [f32; 3],
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            extents: default_extents(),
            mass: default_tile_mass(),
            spacing: default_spacing(),
            axis: default_axis(),
            origin: default_origin(),
            linear_damping: default_linear_damping(),
            topple_impulse: default_topple_impulse(),
        }
    }
}

impl TileConfig {
    pub fn extents(&self) -> Vec3 {
        Vec3::from_array(self.extents)
    }

    pub fn half_extents(&self) -> Vec3 {
        self.extents() * 0.5
    }

    /// Unit direction of the row.
    pub fn axis(&self) -> Vec3 {
        Vec3::from_array(self.axis).normalize_or(Vec3::X)
    }

    /// Initial centre of tile `index`: `origin + index * spacing * axis`.
    #[allow(clippy::cast_precision_loss)]
    pub fn layout_position(&self, index: usize) -> Vec3 {
        Vec3::from_array(self.origin) + self.axis() * (index as f32 * self.spacing)
    }

    pub fn topple_impulse(&self) -> Vec3 {
        Vec3::from_array(self.topple_impulse)
    }
}

// ---------------------------------------------------------------------------
// SurfaceConfig
// ---------------------------------------------------------------------------

/// Per-contact surface parameters applied by the contact relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Coulomb friction coefficient. Kept high so a toppling tile pivots on
    /// its edge instead of sliding.
    #[serde(default = "default_friction")]
    pub friction: f32,

    #[serde(default)]
    pub restitution: f32,

    /// Maximum number of contacts kept per colliding pair and step.
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            friction: default_friction(),
            restitution: 0.0,
            max_contacts: default_max_contacts(),
        }
    }
}

// ---------------------------------------------------------------------------
// SleepConfig
// ---------------------------------------------------------------------------

/// Auto-disable: a body whose velocities stay under both thresholds for
/// `settle_steps` consecutive steps is put to sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Linear velocity floor, m/s.
    #[serde(default = "default_sleep_linear_threshold")]
    pub linear_threshold: f32,

    /// Angular velocity floor, rad/s.
    #[serde(default = "default_sleep_angular_threshold")]
    pub angular_threshold: f32,

    #[serde(default = "default_settle_steps")]
    pub settle_steps: u32,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            linear_threshold: default_sleep_linear_threshold(),
            angular_threshold: default_sleep_angular_threshold(),
            settle_steps: default_settle_steps(),
        }
    }
}

impl SleepConfig {
    /// Settling window expressed in seconds of simulated time.
    #[allow(clippy::cast_precision_loss)]
    pub fn time_until_sleep(&self, dt: f32) -> f32 {
        self.settle_steps as f32 * dt
    }
}

// ---------------------------------------------------------------------------
// CameraConfig
// ---------------------------------------------------------------------------

/// Initial orbit camera state and interaction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Angle around +Z, radians.
    #[serde(default = "default_azimuth")]
    pub azimuth: f32,

    /// Polar angle measured from +Z, radians. Must lie in (0, π).
    #[serde(default = "default_elevation")]
    pub elevation: f32,

    /// Distance from the focus point, metres.
    #[serde(default = "default_distance")]
    pub distance: f32,

    /// Drag rotation speed, rad/s.
    #[serde(default = "default_rotate_speed")]
    pub rotate_speed: f32,

    /// Distance multiplier per zoom key press.
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f32,

    /// Focus displacement per pan key press, metres.
    #[serde(default = "default_pan_step")]
    pub pan_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            azimuth: default_azimuth(),
            elevation: default_elevation(),
            distance: default_distance(),
            rotate_speed: default_rotate_speed(),
            zoom_factor: default_zoom_factor(),
            pan_step: default_pan_step(),
        }
    }
}

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial window size [width, height] in logical pixels.
    #[serde(default = "default_window_size")]
    pub size: [u32; 2],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            size: default_window_size(),
        }
    }
}

// ---------------------------------------------------------------------------
// DominoConfig
// ---------------------------------------------------------------------------

/// Full program configuration. Every section and field is optional in TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
pub struct DominoConfig {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub tiles: TileConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub sleep: SleepConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

impl DominoConfig {
    /// Validate configuration. Returns Err on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.sim;
        if !(sim.physics_dt > 0.0) {
            return Err(ConfigError::InvalidPhysicsDt(sim.physics_dt));
        }
        if sim.contact_natural_frequency <= 0.0 {
            return Err(ConfigError::invalid(
                "sim.contact_natural_frequency",
                "must be > 0",
            ));
        }
        if sim.contact_damping_ratio < 0.0 {
            return Err(ConfigError::invalid("sim.contact_damping_ratio", "must be >= 0"));
        }
        if sim.allowed_linear_error < 0.0 {
            return Err(ConfigError::invalid("sim.allowed_linear_error", "must be >= 0"));
        }
        if sim.max_corrective_velocity <= 0.0 {
            return Err(ConfigError::invalid(
                "sim.max_corrective_velocity",
                "must be > 0",
            ));
        }

        let tiles = &self.tiles;
        if tiles.extents.iter().any(|&e| e <= 0.0) {
            return Err(ConfigError::invalid("tiles.extents", "all extents must be > 0"));
        }
        if tiles.mass <= 0.0 {
            return Err(ConfigError::invalid("tiles.mass", "must be > 0"));
        }
        if tiles.spacing <= 0.0 {
            return Err(ConfigError::invalid("tiles.spacing", "must be > 0"));
        }
        if Vec3::from_array(tiles.axis).length_squared() <= f32::EPSILON {
            return Err(ConfigError::invalid("tiles.axis", "must be non-zero"));
        }
        if tiles.linear_damping < 0.0 {
            return Err(ConfigError::invalid("tiles.linear_damping", "must be >= 0"));
        }

        if self.surface.friction < 0.0 {
            return Err(ConfigError::invalid("surface.friction", "must be >= 0"));
        }
        if self.surface.max_contacts == 0 {
            return Err(ConfigError::invalid("surface.max_contacts", "must be >= 1"));
        }

        if self.sleep.enabled && self.sleep.settle_steps == 0 {
            return Err(ConfigError::invalid("sleep.settle_steps", "must be >= 1"));
        }

        let camera = &self.camera;
        if camera.distance <= 0.0 {
            return Err(ConfigError::invalid("camera.distance", "must be > 0"));
        }
        if !(camera.elevation > 0.0 && camera.elevation < PI) {
            return Err(ConfigError::invalid("camera.elevation", "must lie in (0, pi)"));
        }
        if camera.zoom_factor <= 1.0 {
            return Err(ConfigError::invalid("camera.zoom_factor", "must be > 1"));
        }

        Ok(())
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        DominoConfig::default().validate().unwrap();
    }

    #[test]
    fn default_spacing_is_shorter_than_tile_height() {
        let tiles = TileConfig::default();
        assert!(tiles.spacing < tiles.extents[2]);
        // Gap between neighbours leaves room to tip.
        assert!(tiles.spacing > tiles.extents[0]);
    }

    #[test]
    fn layout_position_walks_the_axis() {
        let tiles = TileConfig::default();
        let p0 = tiles.layout_position(0);
        let p3 = tiles.layout_position(3);
        assert_eq!(p0, Vec3::new(-4.0, 0.0, 0.25));
        assert!((p3 - p0 - Vec3::X * 0.6).length() < 1e-6);
    }

    #[test]
    fn layout_axis_is_normalized() {
        let tiles = TileConfig {
            axis: [0.0, 3.0, 0.0],
            ..TileConfig::default()
        };
        assert!((tiles.axis() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn tile_rests_on_ground() {
        let tiles = TileConfig::default();
        assert!((tiles.origin[2] - tiles.half_extents().z).abs() < 1e-6);
    }

    #[test]
    fn time_until_sleep_scales_with_dt() {
        let sleep = SleepConfig {
            settle_steps: 10,
            ..SleepConfig::default()
        };
        assert!((sleep.time_until_sleep(0.01) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn invalid_physics_dt() {
        let mut config = DominoConfig::default();
        config.sim.physics_dt = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPhysicsDt(_))
        ));
        config.sim.physics_dt = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_tile_values() {
        let mut config = DominoConfig::default();
        config.tiles.extents = [0.04, 0.0, 0.5];
        assert!(config.validate().is_err());

        let mut config = DominoConfig::default();
        config.tiles.spacing = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tiles.spacing"));

        let mut config = DominoConfig::default();
        config.tiles.axis = [0.0; 3];
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_camera_values() {
        let mut config = DominoConfig::default();
        config.camera.elevation = 0.0;
        assert!(config.validate().is_err());

        let mut config = DominoConfig::default();
        config.camera.zoom_factor = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_contacts_rejected() {
        let mut config = DominoConfig::default();
        config.surface.max_contacts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = DominoConfig::from_toml_str("").unwrap();
        assert_eq!(config, DominoConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let toml_str = r#"
            [sim]
            physics_dt = 0.005
            gravity = [0.0, 0.0, -1.62]

            [surface]
            friction = 2.5

            [window]
            title = "Moon Dominoes"
        "#;
        let config = DominoConfig::from_toml_str(toml_str).unwrap();
        assert!((config.sim.physics_dt - 0.005).abs() < f64::EPSILON);
        assert_eq!(config.sim.gravity, [0.0, 0.0, -1.62]);
        assert!((config.surface.friction - 2.5).abs() < f32::EPSILON);
        assert_eq!(config.surface.max_contacts, 20);
        assert_eq!(config.window.title, "Moon Dominoes");
        assert_eq!(config.window.size, [700, 500]);
        assert_eq!(config.tiles, TileConfig::default());
    }

    #[test]
    fn invalid_toml_value_is_rejected() {
        let err = DominoConfig::from_toml_str("[tiles]\nmass = -2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DominoConfig::from_toml_str("[sim\nphysics_dt = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let err = DominoConfig::from_file("/nonexistent/domino.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bundled_moon_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/moon.toml");
        let config = DominoConfig::from_file(path).unwrap();
        assert_eq!(config.sim.gravity, [0.0, 0.0, -1.62]);
        assert_eq!(config.sleep.settle_steps, 100);
        assert_eq!(config.tiles, TileConfig::default());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = DominoConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back = DominoConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
