//! Core logic: parsing, the list view-model and screen controllers.

pub mod adapter;
pub mod controller;
pub mod dispatch;
pub mod format;
pub mod records;
pub mod state;
