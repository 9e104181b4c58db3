//! Unit tests for cleangraph-cli, organized by module.
//!
//! Tests are BDD-style with Given/When/Then doc comments and descriptive names.

mod middleware;
