// src/common.rs

pub mod case;
pub mod envelope;
pub mod error;
pub mod messages;
pub mod serde_utils;
pub mod session;
