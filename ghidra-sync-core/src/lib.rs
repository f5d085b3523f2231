#![doc = "ghidra-sync-core: mirror logic for refreshing vendored Ghidra files from upstream."]

//! The network sits behind [`contract::RemoteLister`] and the filesystem behind
//! [`contract::FileWriter`], so every procedure here can run against mocks.
//!
//! # Usage
//! Build a [`config::SyncConfig`], pick a [`synchronise::SyncMode`] and call
//! [`synchronise::synchronise`] with a [`github::GithubClient`] and a [`writer::FsWriter`].

pub mod config;
pub mod contract;
pub mod error;
pub mod github;
pub mod inventory;
pub mod mirror;
pub mod synchronise;
pub mod tree;
pub mod writer;

pub use error::{Result, SyncError};
