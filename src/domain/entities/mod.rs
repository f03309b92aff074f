//! Core domain entities.
//!
//! - [`Link`] - A code and the target it redirects to
//! - [`SpecialCode`] - Reserved codes with their own resolution rules

pub mod link;
pub mod special_code;

pub use link::Link;
pub use special_code::SpecialCode;
