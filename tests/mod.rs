//! Workspace-wide integration tests.
//!
//! The test targets live under `backends/<crate>/` and are registered as
//! `[[test]]` entries in this crate's manifest.
