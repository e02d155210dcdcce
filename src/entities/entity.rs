use std::fmt::{Display, Formatter};

/// A unique handle to a live entity.
///
/// Identifiers are recycled: once an entity is destroyed its id may be handed out again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Entity {
	id: u32,
}

impl Entity {
	#[inline(always)]
	pub const fn from_raw(id: u32) -> Self {
		Self { id }
	}

	#[inline(always)]
	pub const fn id(&self) -> u32 {
		self.id
	}

	#[inline(always)]
	pub(crate) const fn index(&self) -> usize {
		self.id as usize
	}
}

impl nohash_hasher::IsEnabled for Entity {}

impl Display for Entity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.id)
	}
}
