//! Daily MMR mini-game bot.
//!
//! Players open the menu with `/mmr` and press **Play** once per (UTC) day for a
//! random rating change of `-30..=30` plus a streak bonus of `min(streak * 2, 10)`.
//! Ratings map to rank labels through [`model::ranks`]; players live in a
//! [`database::PlayerStore`] (PostgreSQL or in memory).
//!
//! The binary also serves a liveness endpoint and can ping its own public URL,
//! see [`keepalive`].

pub mod api;
pub mod args;
pub mod bot;
pub mod database;
pub mod keepalive;
pub mod model;
pub mod utils;
