//! ClassTrack - Academic Year Context Service
//!
//! Resolves which academic year a request operates against for the
//! ClassTrack school administration platform, and persists year-switch
//! intents: per-session via an http-only cookie, or tenant-wide via the
//! school's default year.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
