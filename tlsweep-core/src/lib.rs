//! Tlsweep Core
//!
//! Core types shared by the tlsweep client and runner.
//!
//! This crate contains:
//! - Domain types: scan reports, scan statuses and stored documents
//! - DTOs: request parameters sent to the analyze endpoint

pub mod domain;
pub mod dto;
