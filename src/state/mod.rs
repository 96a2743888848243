/// State management module
///
/// This module handles all application state, including:
/// - The selfie record model (data.rs)
/// - Reading and writing the selfie list file (store.rs)
/// - The per-run session that owns the list (session.rs)

pub mod data;
pub mod error;
pub mod session;
pub mod store;
