#![forbid(unsafe_code)]

//! State controller for FrankenPick pickers.
//!
//! A [`PickerController`] coordinates the query text, the open/closed menu,
//! the focused candidate, and the selected candidate of a searchable
//! single-select picker. Query and selection may each be owned locally or by
//! the caller; see [`Controllable`].
//!
//! # Feature Flags
//!
//! - `tracing`: emit `debug`/`trace` events under the `fpick::picker` target.
//! - `config-json`: load and save [`PickerConfig`] as JSON.

pub mod builder;
pub mod config;
pub mod controllable;
pub mod controller;
pub mod error;
pub mod query;
pub mod selection;
pub mod trigger;

pub use builder::PickerBuilder;
#[cfg(feature = "config-json")]
pub use config::ConfigError;
pub use config::{MenuTriggerMode, PickerConfig};
pub use controllable::{ChangeHook, Controllable, Request};
pub use controller::{OpenChangeHook, PickerController};
pub use error::BuildError;
pub use query::{ItemSource, QueryFilter};
pub use selection::{SelectionManager, SingleSelectList};
pub use trigger::{FocusStrategy, MenuTrigger, Transition, TriggerReason};
