//! Modules layer - infrastructure components shared by features
//!
//! Currently holds the local poster file store.

pub mod storage;
