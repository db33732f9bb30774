//! Cross-cutting helpers shared by the dashboard modules.

pub mod config;
pub mod format;
pub mod platform;
pub mod timing;
