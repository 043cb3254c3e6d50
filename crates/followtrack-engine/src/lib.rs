//! FollowTrack Engine - Orchestration layer
//!
//! Provides high-level commands that coordinate the export normalizer, diff
//! engine and analysis in `followtrack-core` with persistence in
//! `followtrack-store`.

pub mod commands;
