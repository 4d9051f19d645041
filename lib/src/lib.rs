#[macro_use]
pub(crate) mod util;
pub mod error;
pub mod game;
pub mod primitives;
pub mod rules;
