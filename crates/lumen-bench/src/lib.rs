//! Benchmarks for Lumen post-processing.
//!
//! The benchmarks live in `benches/`. Run with: `cargo bench -p lumen-bench`
