#![forbid(unsafe_code)]

//! Tweet-styled sticker generation core.
//!
//! Turns a short text plus a user's profile data into a rendered,
//! tweet-styled raster image and publishes it to an external store that
//! hands back a reusable reference. The host platform integration supplies
//! the I/O capabilities ([`platform::Platform`]) and drives
//! [`generator::StickerGenerator::generate`]; everything transport-shaped
//! (command routing, dialogs, network clients) lives outside this crate.

pub mod config;
pub mod errors;
pub mod generator;
pub mod header_cache;
pub mod models;
pub mod persistence;
pub mod platform;
pub mod publisher;
pub mod render;
pub mod supervisor;

pub use config::GlobalConfig;
pub use errors::{AppError, LayoutError, Result};
