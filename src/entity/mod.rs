//! Database entity models for mediamine-auth.
//!
//! These are the Sea-ORM entity definitions for the tables the authentication
//! subsystem reads and writes. The `user` table is owned by the wider
//! application and is only ever read here; the `user_session` table holds the
//! single "current session" row per user.

/// User entity model, read-only from this crate's perspective.
pub mod user;

/// Per-user session row tracking whether the user is currently signed in.
pub mod user_session;
