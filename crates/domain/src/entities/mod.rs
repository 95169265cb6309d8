//! Domain entities

pub mod turn;

pub use turn::Turn;
