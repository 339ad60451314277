//! Index layer tests
//!
//! Ranking against hand-built indexes, JSON export format, and the
//! read/write behavior of the concurrent guard.

mod test_concurrent;
mod test_export;
mod test_search;
