//! Repository functions for the domain layer.

pub mod players;
pub mod rooms;
pub mod rounds;
pub mod scores;
