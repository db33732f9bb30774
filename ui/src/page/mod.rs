//! Page conveniences that sit beside the chart and share none of its state:
//! modal focus and date defaults, range highlighting, keyboard shortcuts and
//! the aquarium selector backdrop.

pub mod backdrop;
pub mod modal;
pub mod range;
pub mod shortcuts;
