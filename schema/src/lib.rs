// Celestial Duel Schema - Shared static data definitions
// This crate holds the closed enums and data records shared between the
// battle engine and the roster files it reads, so that both sides agree on
// one serialized shape.

pub use element::*;
pub use move_data::*;
pub use roster::*;

pub mod element;
pub mod move_data;
pub mod roster;
