/// Generate a by-value getter and a `set_` setter for a `Copy` field.
///
/// An optional `=> method` suffix calls `self.method()` after every write,
/// for types caching values derived from their fields.
macro_rules! property {
    ($field: ident : $ty: ty) => {
        paste::paste! {
            #[inline(always)]
            pub fn $field(&self) -> $ty {
                self.$field
            }

            #[inline(always)]
            pub fn [<set_ $field>](&mut self, value: $ty) {
                self.$field = value;
            }
        }
    };
    ($field: ident : $ty: ty => $refresh: ident) => {
        paste::paste! {
            #[inline(always)]
            pub fn $field(&self) -> $ty {
                self.$field
            }

            pub fn [<set_ $field>](&mut self, value: $ty) {
                self.$field = value;
                self.$refresh();
            }
        }
    };
}
