//! Command implementations.

pub mod alerts;
pub mod compare;
pub mod list;
pub mod scan;
