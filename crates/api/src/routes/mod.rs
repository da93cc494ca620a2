//! HTTP route handlers

pub mod driving;
