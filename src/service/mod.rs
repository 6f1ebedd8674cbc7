//! Storage operations used by the handlers

pub mod group;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;
