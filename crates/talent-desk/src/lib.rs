//! Typed client and review workflows for the HR administration API.
//!
//! The remote API owns every record. This crate mirrors the state the review
//! screens hold: searchable candidate lists, evaluation requests, and the
//! approve/reject decisions that move a candidate through the pending queue.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod telemetry;
pub mod workflows;
