//! Wire and domain types shared by the recruitment client crates.

pub mod domain;
pub mod error;
pub mod protocol;
