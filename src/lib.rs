//! # kafka-producer
//!
//! Startup configuration for the Kafka message producer.
//!
//! Settings come from a local `.env` file during development, or from the
//! Docker Swarm secrets mount when deployed. The loaded [`config::Config`]
//! is validated up front so the producer never starts half-configured.

pub mod config;
pub mod error;
pub mod telemetry;
