//! Engagement and social-graph aggregation engine.
//!
//! The core of the media-sharing backend: idempotent like/subscription
//! toggles, ownership-gated mutation of videos, tweets and comments, and the
//! cross-collection channel aggregates. Request routing, auth token
//! verification and media storage live in external collaborators; this crate
//! exposes the operation-level API they call into.

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod services;
pub mod telemetry;
