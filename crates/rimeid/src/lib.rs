#![doc = include_str!("../README.md")]

mod config;
mod error;
mod id;
mod time;
mod worker;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::time::*;
pub use crate::worker::*;
