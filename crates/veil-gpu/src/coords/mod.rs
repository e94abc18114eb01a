//! Plain value types shared by recorders and backends.
//!
//! Viewports are in physical pixels, origin bottom-left, matching what
//! `set_viewport_transform` hands to the device.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
