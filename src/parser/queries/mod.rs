//! Grammar-based mapping extraction.
//!
//! Each language module walks a full syntax tree, which is more precise
//! than pattern matching. Languages without a bundled grammar go through
//! `parser::pattern` instead.

pub mod java;
