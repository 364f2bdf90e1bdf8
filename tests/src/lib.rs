//! # Purify Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Tensor generators and reference computations
//! └── integration/
//!     ├── scenarios.rs   # Worked examples with exact values
//!     └── properties.rs  # proptest invariants
//!
//! tests/benches/
//! └── purify_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p purify-tests
//!
//! # By category
//! cargo test -p purify-tests integration::scenarios::
//! cargo test -p purify-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p purify-tests
//! ```

pub mod fixtures;
pub mod integration;
