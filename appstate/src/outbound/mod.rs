//! Outbound adapters for the driven ports.

pub mod storage;
