//! Event construction
//!
//! Builds [`ClientStreamEvent`](strm_protocol::ClientStreamEvent) records
//! for sending through the [`Sender`](crate::Sender).

mod builder;

#[cfg(test)]
mod builder_test;

pub use builder::EventBuilder;
