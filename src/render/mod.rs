//! Instanced rendering on top of the ECS.
//!
//! The [RenderSystem] mirrors every entity carrying a [MeshRenderer](crate::scene::MeshRenderer)
//! into a [BatchAllocator], which packs mesh data per shader so that each shader is drawn
//! with a single indirect multi-draw call through a [GraphicsBackend].

mod backend;
mod batch;
mod camera_system;
mod geometry;
mod headless;
mod light_system;
mod material;
mod mesh;
mod render_system;

pub use backend::*;
pub use batch::*;
pub use camera_system::*;
pub use geometry::*;
pub use headless::*;
pub use light_system::*;
pub use material::*;
pub use mesh::*;
pub use render_system::*;
