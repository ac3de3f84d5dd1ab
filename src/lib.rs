//! Reviewer assignment service: teams, users, and pull requests with
//! automatic reviewer selection and reassignment.

pub mod config;
pub mod error;
pub mod review;
pub mod telemetry;
