//! Wash queue integration tests.

mod support;
mod listing;
mod persistence;
