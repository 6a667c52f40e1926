//! promptcraft - Quota-gated prompt builders for generative-AI platforms
//!
//! Assembles prompt text for image, video, music and app-builder tools from
//! structured fields. Every generation spends one unit of the user's daily
//! quota, held in a Supabase-backed store and mirrored in a local profile.

pub mod assembler;
pub mod category;
pub mod cli;
pub mod config;
pub mod gate;
pub mod profile;
pub mod session;
pub mod store;
pub mod util;
pub mod workflow;
