//! Test modules for the Sentinel Map crate
//!
//! Everything here runs against the built-in vector surface or small
//! counting surfaces; no map engine is required.
