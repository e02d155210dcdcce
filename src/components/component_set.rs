use crate::components::{Component, ComponentDirectory};
use crate::data_structures::ComponentMask;

/// A tuple of [Component] types whose bits can be combined into a single [ComponentMask].
///
/// ```ignore
/// let mask = <(Transform, MeshRenderer)>::mask(&directory);
/// ```
pub trait ComponentSet {
	/// Combine the bits of every type in the set.
	///
	/// # Panics
	/// Panics if any type in the set is not registered.
	fn mask(directory: &ComponentDirectory) -> ComponentMask;
}

impl ComponentSet for () {
	fn mask(_: &ComponentDirectory) -> ComponentMask {
		ComponentMask::EMPTY
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl <$($t: Component),*> ComponentSet for ($($t),*,) {
            fn mask(directory: &ComponentDirectory) -> ComponentMask {
                ComponentMask::EMPTY $(| directory.mask_of::<$t>())*
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
