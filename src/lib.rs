//! Texide library exports for testing

pub mod compile;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
