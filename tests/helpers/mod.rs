//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod host_helpers;
pub mod object_assertions;
pub mod source_fixtures;
