//! Transport helpers shared by every `cw-sdk` call.

mod error;
pub mod helper;

pub use error::Error;
