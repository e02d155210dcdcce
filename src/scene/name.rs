use crate::components::Component;
use std::fmt::{Display, Formatter};

#[derive(Component, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Name(pub String);

impl Name {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for Name {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}
