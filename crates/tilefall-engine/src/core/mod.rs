pub use self::{canvas::*, cell::*, piece::*, skin::*};

pub(crate) mod canvas;
pub(crate) mod cell;
pub(crate) mod piece;
pub(crate) mod skin;
