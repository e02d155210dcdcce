//! Typed data attached to [entities](crate::entities::Entity).
//!
//! Every [Component] type lives in its own packed [ComponentStore]; the [ComponentDirectory]
//! routes typed calls to the right store and owns the type-to-bit mapping used by
//! [component masks](crate::data_structures::ComponentMask).

mod component_directory;
mod component_id;
mod component_set;
mod component_store;

pub use component_directory::*;
pub use component_id::*;
pub use component_set::*;
pub use component_store::*;
pub use kuai_ecs_derive::Component;
