//! Unit tests for the flannel charm
//!
//! These tests use scripted command runners and temporary directories and
//! run fast without touching the host.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;
mod juju_host;
mod property_tests;
