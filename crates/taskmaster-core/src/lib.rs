//! # Taskmaster Core Library
//!
//! This library provides the core logic for Taskmaster, a personal task and
//! time tracker. The terminal front end in `taskmaster-cli` is a thin layer
//! over the types exported here.
//!
//! ## Architecture
//!
//! - **Task model**: Tasks made of time-stamped activities, serialized as a
//!   single JSON document
//! - **Storage**: JSON task document that is rewritten in full on every
//!   mutation, plus TOML-based configuration
//! - **Session**: A cursor-based state machine deciding which task and
//!   activity are current
//! - **Report**: Markdown-like duration report built from the task store
//!
//! ## Key Components
//!
//! - [`TaskStore`]: Ordered task collection with load/save
//! - [`Session`]: Interactive state machine
//! - [`format_duration`]: Compact duration rendering
//! - [`Config`]: Application configuration management

pub mod duration;
pub mod error;
pub mod report;
pub mod session;
pub mod storage;
pub mod task;

pub use duration::format_duration;
pub use error::{ConfigError, CoreError, LoadError, ValidationError};
pub use report::{export_report, render_report};
pub use session::{MainChoice, SelectError, Session, SessionState, TaskChoice};
pub use storage::{Config, TaskStore};
pub use task::{Activity, Task, TaskDocument};
