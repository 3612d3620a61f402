//! Cross-crate integration tests for the tickbar workspace live in `tests/`.
