//! Upstream Module
//!
//! Client and payload types for the Hacker News search API.

mod client;
mod hit;

pub use client::{SearchClient, SearchPage};
pub use hit::{Hit, HitTag};
