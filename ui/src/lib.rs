//! Shared UI crate for Reefboard: measurement loading, the chart engine, page
//! behaviors and the Dioxus views that bind them.

pub mod boot;
pub mod chart;
pub mod components;
pub mod core;
pub mod i18n;
pub mod measurements;
pub mod page;
pub mod views;

pub use boot::BootConfig;
pub use views::Dashboard;
