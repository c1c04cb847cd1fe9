//! Software rendering pipeline.
//!
//! Model space -> world -> clip space (clipped) -> screen -> pixels.

pub mod clipper;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod shader;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use clipper::{clip_triangle, ClipPlane, ClipPolygon, ClipVertex};
pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, Fragment, FragmentShader, RasterVertex};
pub use renderer::{DrawStats, RenderOptions, Renderer};
pub use shader::PhongShader;

/// What to draw for each triangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Filled,
    Wireframe,
    FilledWireframe,
}

impl RenderMode {
    /// The next mode in the cycle, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Filled => Self::Wireframe,
            Self::Wireframe => Self::FilledWireframe,
            Self::FilledWireframe => Self::Filled,
        }
    }

    pub fn fills(self) -> bool {
        matches!(self, Self::Filled | Self::FilledWireframe)
    }

    pub fn outlines(self) -> bool {
        matches!(self, Self::Wireframe | Self::FilledWireframe)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Filled => "filled",
            Self::Wireframe => "wireframe",
            Self::FilledWireframe => "filled + wireframe",
        })
    }
}
