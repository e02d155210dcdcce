//! Built-in [components](crate::components::Component) understood by the core systems.

mod camera;
mod light;
mod mesh_renderer;
mod name;
mod transform;

pub use camera::*;
pub use light::*;
pub use mesh_renderer::*;
pub use name::*;
pub use transform::*;
