//! Integration tests for Lumen crates.
//!
//! End-to-end checks across crate boundaries: PNG in, session, PNG out;
//! settings files driving the grade; reference values for the shipped look.

pub mod reference;
