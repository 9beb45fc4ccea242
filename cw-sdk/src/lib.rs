#![doc = include_str!("../README.md")]

pub mod auth;
pub mod clock;
mod client;
mod error;
pub mod operation;
pub(crate) mod utils;

pub use client::{BASE_URL, Client};
pub use error::Error;
pub use operation::OperationStatus;
pub use reqwest::Method;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "app")]
pub mod app;

#[cfg(feature = "ssh_key")]
pub mod ssh_key;

#[cfg(feature = "team")]
pub mod team;

#[cfg(feature = "project")]
pub mod project;
