//! Term extraction components
//!
//! This module provides noun phrase scanning, the per-document term table,
//! and threshold filtering with collapse of subsumed terms.

pub mod filter;
pub mod scanner;
pub mod table;
