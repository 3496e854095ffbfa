//! # ease-core
//!
//! Shared types for the Ease action-call engine:
//!
//! - [`ActionSchema`] / [`ParameterSpec`]: the typed contract of each action
//! - [`ActionCall`] / [`ActionResult`]: what the engine parses and produces
//! - [`records`]: domain records handlers create (to-dos, moods, reminders, ...)
//! - [`config`]: YAML configuration shared by the engine and the CLI

pub mod action;
pub mod config;
pub mod identity;
pub mod records;

pub use action::{
    ActionCall, ActionResult, ActionSchema, FailureKind, ParamKind, ParameterSpec, json_type_name,
};
pub use config::{
    CatalogConfig, ConfigError, EaseConfig, ExtractorConfig, ObservabilityConfig, SummaryConfig,
};
pub use identity::UserIdentity;
pub use records::{
    AppointmentRequest, AppointmentStatus, Habit, HabitFrequency, Mood, MoodEntry, Priority,
    Reminder, Repeat, SessionType, TodoItem,
};
