//! Runtime configuration, read from an optional JSON file.
//!
//! Every section falls back to its defaults, so a config file only needs the
//! keys it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::CameraKind;
use crate::error::{Error, Result};
use crate::light::{DirectionalLight, Fog, FogMode, SpotLight};
use crate::math::{Mat4, Vec3};
use crate::render::RenderMode;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub car: CarConfig,
    pub track: TrackConfig,
    pub cameras: CameraConfig,
    pub lighting: LightingConfig,
    pub fog: FogConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Graphics 3D".into(),
            width: 800,
            height: 600,
            target_fps: 60,
        }
    }
}

/// How a mesh file is fitted into the world before it is placed.
///
/// The asset is rotated about X first (the shipped models are Z-up), then
/// uniformly scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshFit {
    pub scale: f32,
    /// Degrees about +X.
    pub rotation_x: f32,
}

impl Default for MeshFit {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_x: -90.0,
        }
    }
}

impl MeshFit {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::scaling_uniform(self.scale) * Mat4::rotation_x(self.rotation_x.to_radians())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub model: PathBuf,
    pub fit: MeshFit,
    pub position: Vec3,
    /// Degrees about +Y.
    pub heading: f32,
    /// Units per second.
    pub speed: f32,
    /// Degrees per second.
    pub turn_rate: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/mustang/mustang_GT.obj"),
            fit: MeshFit {
                scale: 0.007,
                ..Default::default()
            },
            position: Vec3::new(8.8, -1.77, 0.0),
            heading: -12.0,
            speed: 2.5,
            turn_rate: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub model: PathBuf,
    pub fit: MeshFit,
    pub position: Vec3,
    /// Replaces the sun's ambient term on the track.
    pub ambient: Option<Vec3>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/track01/track01.obj"),
            fit: MeshFit {
                scale: 0.02,
                ..Default::default()
            },
            position: Vec3::new(0.0, -1.75, 0.0),
            ambient: Some(Vec3::splat(0.5)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial: CameraKind,
    pub fps_position: Vec3,
    pub static_position: Vec3,
    pub follow_position: Vec3,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial: CameraKind::Car,
            fps_position: Vec3::new(0.0, -1.0, 3.0),
            static_position: Vec3::new(0.0, 10.0, 0.0),
            follow_position: Vec3::new(0.0, 3.0, 5.0),
            move_speed: 2.5,
            mouse_sensitivity: 0.1,
        }
    }
}

/// Spot light parameters with the cone given in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotConfig {
    pub enabled: bool,
    pub cut_off: f32,
    pub outer_cut_off: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for SpotConfig {
    fn default() -> Self {
        let light = SpotLight::default();
        Self {
            enabled: true,
            cut_off: 12.5,
            outer_cut_off: 20.0,
            ambient: light.ambient,
            diffuse: light.diffuse,
            specular: light.specular,
            constant: light.constant,
            linear: light.linear,
            quadratic: light.quadratic,
        }
    }
}

impl SpotConfig {
    /// The light itself, not yet aimed.
    pub fn to_light(&self) -> SpotLight {
        SpotLight {
            cut_off: self.cut_off.to_radians().cos(),
            outer_cut_off: self.outer_cut_off.to_radians().cos(),
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
            constant: self.constant,
            linear: self.linear,
            quadratic: self.quadratic,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub sun: DirectionalLight,
    pub spot: SpotConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    /// Defaults to the clear colour so distant geometry fades into the background.
    pub color: Option<Vec3>,
    pub mode: FogMode,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: None,
            mode: Fog::default().mode,
        }
    }
}

impl FogConfig {
    pub fn to_fog(&self, background: Vec3) -> Fog {
        Fog {
            color: self.color.unwrap_or(background),
            mode: self.mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: Vec3,
    pub backface_culling: bool,
    pub mode: RenderMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Vec3::splat(0.05),
            backface_culling: false,
            mode: RenderMode::Filled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.cameras.initial, CameraKind::Car);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "car": { "speed": 5.0 }, "fog": { "enabled": true } }"#)
                .unwrap();
        assert_eq!(config.car.speed, 5.0);
        assert_eq!(config.car.heading, -12.0);
        assert_eq!(config.car.position, Vec3::new(8.8, -1.77, 0.0));
        assert!(config.fog.enabled);
        assert_eq!(config.fog.mode, Fog::default().mode);
        assert!(config.fog.color.is_none());
    }

    #[test]
    fn spot_cone_converts_to_cosines() {
        let spot = SpotConfig::default().to_light();
        assert_relative_eq!(spot.cut_off, 12.5f32.to_radians().cos());
        assert_relative_eq!(spot.outer_cut_off, 20.0f32.to_radians().cos());
    }

    #[test]
    fn mesh_fit_turns_z_up_into_y_up() {
        let fit = MeshFit {
            scale: 2.0,
            rotation_x: -90.0,
        };
        let up = fit.to_matrix().transform_point(Vec3::Z);
        assert_relative_eq!(up.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(up.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn load_reads_file_and_reports_errors() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.json");
        let mut file = std::fs::File::create(&good).unwrap();
        writeln!(file, r#"{{ "render": {{ "mode": "wireframe", "backface_culling": true }} }}"#)
            .unwrap();
        let config = Config::load(&good).unwrap();
        assert_eq!(config.render.mode, RenderMode::Wireframe);
        assert!(config.render.backface_culling);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(Config::load(&bad), Err(Error::Config { .. })));

        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(Error::Io { .. })));
    }
}
