//! Small reusable render helpers.

pub mod status_indicator;
