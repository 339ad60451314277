//! Indexer layer tests
//!
//! Directory builds on one thread and on a work queue, and the text
//! handling of the files they read.

mod test_builder;
