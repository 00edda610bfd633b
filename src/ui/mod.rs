//! Panel layout and chart rendering.

pub mod panels;
pub mod plot;
