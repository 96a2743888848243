/// Photo handling module
///
/// This module handles:
/// - Capturing a new selfie into the pictures directory
/// - Decoding list thumbnails
/// - Decoding a single photo scaled to the viewer

pub mod capture;
pub mod display;
pub mod thumbnail;
