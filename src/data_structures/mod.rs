mod bit_field;
mod component_mask;

pub use bit_field::*;
pub use component_mask::*;
