use crate::data_structures::{BitField, ComponentMask};

#[test]
pub fn bits_beyond_capacity_are_unset() {
	let field = BitField::with_capacity(8);
	assert_eq!(field.capacity(), 64);
	assert!(!field.get(3));
	assert!(!field.get(1000));
}

#[test]
pub fn setting_grows_the_field() {
	let mut field = BitField::new();
	field.set(70, true);

	assert!(field.get(70));
	assert!(field.capacity() >= 71);
	assert_eq!(field.count_ones(), 1);

	field.set(70, false);
	field.set(5000, false);
	assert_eq!(field.count_ones(), 0);
}

#[test]
pub fn iter_ones_is_ascending() {
	let mut field = BitField::with_capacity(128);
	for i in [97, 0, 31, 32, 64] {
		field.set(i, true);
	}

	assert_eq!(field.iter_ones().collect::<Vec<_>>(), vec![0, 31, 32, 64, 97]);

	field.clear();
	assert_eq!(field.iter_ones().count(), 0);
}

#[test]
pub fn mask_operations() {
	let a = ComponentMask::bit(0).with(3);
	let b = ComponentMask::bit(3).with(7);

	assert!(a.intersects(b));
	assert!(!a.intersects(ComponentMask::bit(7)));
	assert_eq!((a & b), ComponentMask::bit(3));
	assert_eq!((a | b).iter().collect::<Vec<_>>(), vec![0, 3, 7]);
	assert!((a | b).contains_all(a));
	assert_eq!(a.without(0), ComponentMask::bit(3));
	assert_eq!(a.count(), 2);
	assert!(ComponentMask::EMPTY.is_empty());
}

#[test]
#[should_panic(expected = "Component bit 32 is out of range")]
pub fn mask_bit_out_of_range() {
	ComponentMask::bit(32);
}
