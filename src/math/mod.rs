//! Small linear algebra types used throughout the renderer.
//!
//! All matrices use the column-vector convention and a right-handed world
//! (X right, Y up, -Z forward), with OpenGL-style clip space.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
