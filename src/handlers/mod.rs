//! HTTP handlers for the prediction gateway.

pub mod app;
pub mod predict;
