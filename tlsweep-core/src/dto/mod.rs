//! Data Transfer Objects for the remote analyze API

pub mod analyze;
