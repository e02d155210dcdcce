use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use std::fmt::{Debug, Formatter};

/// Upper bound on the number of distinct component types a directory can register.
pub const MAX_COMPONENTS: usize = 32;

/// A fixed-width set of component bits.
///
/// Bit `i` is set when the owner holds an instance of the component type that was assigned bit `i`
/// at registration time.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ComponentMask {
	bits: u32,
}

impl ComponentMask {
	pub const EMPTY: ComponentMask = ComponentMask { bits: 0 };

	#[inline(always)]
	pub const fn from_bits(bits: u32) -> Self {
		Self { bits }
	}

	/// A mask with only bit `index` set.
	///
	/// # Panics
	/// Panics if `index` is not smaller than [MAX_COMPONENTS].
	#[inline(always)]
	pub fn bit(index: usize) -> Self {
		assert!(index < MAX_COMPONENTS, "Component bit {index} is out of range");
		Self { bits: 1 << index }
	}

	#[inline(always)]
	pub const fn bits(&self) -> u32 {
		self.bits
	}

	#[inline(always)]
	pub fn get(&self, index: usize) -> bool {
		index < MAX_COMPONENTS && self.bits & (1 << index) != 0
	}

	#[inline(always)]
	pub fn set(&mut self, index: usize, value: bool) {
		let bit = Self::bit(index).bits;
		match value {
			true => self.bits |= bit,
			false => self.bits &= !bit,
		}
	}

	#[inline(always)]
	pub fn with(mut self, index: usize) -> Self {
		self.set(index, true);
		self
	}

	#[inline(always)]
	pub fn without(mut self, index: usize) -> Self {
		self.set(index, false);
		self
	}

	#[inline(always)]
	pub const fn is_empty(&self) -> bool {
		self.bits == 0
	}

	/// Whether the two masks share at least one bit.
	#[inline(always)]
	pub const fn intersects(&self, other: ComponentMask) -> bool {
		self.bits & other.bits != 0
	}

	/// Whether every bit of `other` is also set in `self`.
	#[inline(always)]
	pub const fn contains_all(&self, other: ComponentMask) -> bool {
		self.bits & other.bits == other.bits
	}

	pub const fn count(&self) -> usize {
		self.bits.count_ones() as usize
	}

	/// Iterate over the indices of the set bits.
	pub fn iter(&self) -> impl Iterator<Item = usize> {
		let bits = self.bits;
		(0..MAX_COMPONENTS).filter(move |i| bits & (1u32 << *i) != 0)
	}
}

impl BitOr for ComponentMask {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self::Output {
		Self { bits: self.bits | rhs.bits }
	}
}

impl BitOrAssign for ComponentMask {
	fn bitor_assign(&mut self, rhs: Self) {
		self.bits |= rhs.bits;
	}
}

impl BitAnd for ComponentMask {
	type Output = Self;

	fn bitand(self, rhs: Self) -> Self::Output {
		Self { bits: self.bits & rhs.bits }
	}
}

impl BitAndAssign for ComponentMask {
	fn bitand_assign(&mut self, rhs: Self) {
		self.bits &= rhs.bits;
	}
}

impl Not for ComponentMask {
	type Output = Self;

	fn not(self) -> Self::Output {
		Self { bits: !self.bits }
	}
}

impl Debug for ComponentMask {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ComponentMask({:#034b})", self.bits)
	}
}
