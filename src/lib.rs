//! Glycorisk - Diabetes risk assessment pipeline
//!
//! This crate validates clinical risk-factor input, submits it to a remote
//! inference service and tracks the submission until a classification or a
//! failure is available.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
