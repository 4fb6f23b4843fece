//! What each screen does with the hooks, minus the rendering.

pub mod catalog;
pub mod customer;
pub mod kitchen;
pub mod report;
