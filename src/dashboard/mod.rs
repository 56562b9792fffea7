pub mod commands;
pub mod controller;

pub use controller::{DashboardController, DashboardSnapshot, FormSnapshot};
