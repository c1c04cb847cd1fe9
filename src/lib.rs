//! A small driving demo rendered entirely on the CPU.
//!
//! A car and a race track are loaded from OBJ files, lit by a sun, a spot
//! light carried by the camera and optional fog, and rasterized into a buffer
//! that SDL2 only presents.
//!
//! # Quick Start
//!
//! ```ignore
//! use graphics3d::prelude::*;
//!
//! let config = Config::default();
//! graphics3d::app::run(&config)?;
//! ```

pub mod app;
pub mod camera;
pub mod car;
pub mod colors;
pub mod config;
pub mod error;
pub mod input;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod model;
pub mod render;
pub mod scene;
pub mod texture;
pub mod transform;
pub mod window;

pub use config::Config;
pub use error::{Error, Result};
pub use model::Model;
pub use scene::Scene;
pub use transform::Transform;

/// Prelude module for convenient imports.
pub mod prelude {
    // Cameras
    pub use crate::camera::{
        Camera, CameraKind, CameraMovement, CameraRig, CarCamera, FpsCamera, StaticCamera,
        StaticFollowCamera,
    };

    // Scene
    pub use crate::car::{Car, DriveInput};
    pub use crate::config::Config;
    pub use crate::light::{DirectionalLight, Fog, FogMode, Lighting, SpotLight};
    pub use crate::material::Material;
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::model::Model;
    pub use crate::scene::Scene;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    // Rendering
    pub use crate::render::{RenderMode, RenderOptions, Renderer};

    // Window & Input
    pub use crate::input::{Action, InputState, Key};
    pub use crate::window::{FpsCounter, FrameLimiter, Window, WindowEvent};
}
