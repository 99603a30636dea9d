//! Operational scaffolding for free hosting tiers: a liveness endpoint for the
//! platform's health checks and a loop that pings the public URL so the host
//! never considers the service idle.

pub mod liveness;
pub mod ping;
