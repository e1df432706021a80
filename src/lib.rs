//! Configuration-file synchronization engine.
//!
//! Keeps a declared set of per-application files mirrored between the
//! user's home directory and a storage root, with symlinks as the
//! steady-state representation. Three idempotent operations — `backup`,
//! `restore`, `uninstall` — transition each tracked file based purely on
//! the state found on disk, so interrupted runs self-correct on the next
//! invocation.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — load and validate declarative application profiles
//! - **[`resources`]** — primitive filesystem operations (probe, delete,
//!   copy, link, permission hardening, confirmation prompt)
//! - **[`engine`]** — the per-file synchronization state machine
//! - **[`commands`]** — top-level subcommand orchestration
//!   (`list`, `backup`, `restore`, `uninstall`)

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
