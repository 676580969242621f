//! API routes

pub mod health;
pub mod prs;
pub mod reviews;
pub mod stats;
pub mod verify;
