//! Route handlers.

pub mod company;
pub mod health;
pub mod root;
