//! monobump - change propagation and publish ordering for monorepo releases
//!
//! Given a workspace of interdependent projects and a set of change
//! declarations, this library:
//! - merges declarations into one change request per project
//! - propagates changes to every affected dependent
//! - orders the requests so dependencies are published first
//! - rewrites project versions and dependency specifiers
//! - checks that every modified project has a change declaration

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod release;
