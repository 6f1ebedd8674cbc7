//! Request handlers module

pub mod group;
pub mod user;
