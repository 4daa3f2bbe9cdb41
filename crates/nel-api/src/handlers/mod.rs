//! API handlers
//!
//! Author: hephaex@gmail.com

pub mod annotate;
pub mod health;
pub mod metadata;
