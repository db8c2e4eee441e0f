//! Image intake for farmer-submitted photos.
//!
//! Photos of leaves and soil arrive at the boundary as base64 text, either
//! bare or wrapped in a browser `data:` URL. The `vision` crate turns those
//! payloads into a validated [`Raster`] which the gateway can attach to a
//! multimodal prompt.

pub mod raster;

pub use raster::{decode_base64, decode_bytes, encode_png, split_data_url, Raster, VisionError};
