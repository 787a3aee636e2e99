//! Output targets
//!
//! The output tree is a pure function of the workload indices:
//!
//! ```text
//! <test_id>/rank_<rank>/d_<dir index, 6 digits>/foo<file index>.out
//! ```
//!
//! Downstream tooling diffs trees across runs, so the naming in
//! [`layout`] is bit-exact and carries no randomness.

pub mod layout;

pub use layout::OutputLayout;
