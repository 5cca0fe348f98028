pub use self::{core::*, engine::*, level::*};

pub mod core;
pub mod engine;
pub mod level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("rotation must be 0, 90, 180 or 270 degrees, got {degrees}")]
pub struct InvalidRotationError {
    degrees: i32,
}

impl InvalidRotationError {
    #[must_use]
    pub fn degrees(&self) -> i32 {
        self.degrees
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown level: {name}")]
pub struct UnknownLevelError {
    name: String,
}

impl UnknownLevelError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
