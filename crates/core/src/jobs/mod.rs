//! Job group tracking
//!
//! - [`GatewayService`]: the port every gateway call goes through
//! - [`JobGroup`]: polled status of one submission batch
//! - [`Job`]: one entry of a snapshot with lazily fetched payload/response

pub mod group;
pub mod job;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use group::{JobGroup, PollPolicy};
pub use job::Job;
pub use ports::GatewayService;
