//! Utility modules shared by configuration and rules.

pub mod patterns;

#[doc(inline)]
pub use patterns::{ImportMatcher, ImportPattern};
