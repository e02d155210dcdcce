//! The bit index a [ComponentDirectory](crate::components::ComponentDirectory) assigns to a
//! [Component] type when it is registered.
//!
//! [Component ids](ComponentId) are handed out in registration order within one directory and are not
//! stable between program re-runs.

use crate::data_structures::{ComponentMask, MAX_COMPONENTS};

/// Typed data that can be attached to at most one instance per [entity](crate::entities::Entity).
///
/// Usually implemented with `#[derive(Component)]`.
pub trait Component: 'static {
	/// Human readable type name used in diagnostics.
	const NAME: &'static str;
}

/// The bit position of a registered [Component] type.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: u8,
}

impl ComponentId {
	pub(crate) fn new(value: usize) -> Self {
		debug_assert!(value < MAX_COMPONENTS);
		Self { value: value as u8 }
	}

	#[inline(always)]
	pub const fn index(&self) -> usize {
		self.value as usize
	}

	/// A mask with only this component's bit set.
	#[inline(always)]
	pub fn mask(&self) -> ComponentMask {
		ComponentMask::bit(self.index())
	}
}

impl From<&[ComponentId]> for ComponentMask {
	fn from(ids: &[ComponentId]) -> Self {
		ids.iter().fold(ComponentMask::EMPTY, |mask, id| mask | id.mask())
	}
}
