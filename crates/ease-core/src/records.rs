//! Domain records created by action handlers.
//!
//! Handlers build these from validated arguments and hand them to the
//! caller's persistence hooks. The engine never stores them itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a string-valued enum with its wire names listed once.
///
/// The same names feed the action schemas, so the schema enum values and the
/// record types can never drift apart.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Wire names, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Parse a wire name.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Wire name of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// To-do priority.
    #[derive(Default)]
    pub enum Priority { Low => "low", #[default] Medium => "medium", High => "high" }
}

string_enum! {
    /// Self-reported mood, best to worst.
    pub enum Mood { Great => "great", Good => "good", Okay => "okay", Low => "low", Bad => "bad" }
}

string_enum! {
    /// How often a reminder fires.
    #[derive(Default)]
    pub enum Repeat { #[default] Once => "once", Daily => "daily", Weekly => "weekly" }
}

string_enum! {
    /// Kind of therapy session requested.
    #[derive(Default)]
    pub enum SessionType { #[default] Individual => "individual", Group => "group" }
}

string_enum! {
    /// Target cadence for a habit.
    #[derive(Default)]
    pub enum HabitFrequency { #[default] Daily => "daily", Weekly => "weekly" }
}

/// A to-do item on the user's list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    /// Free-form due date as supplied by the model (e.g. `2024-06-01`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A mood check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: String,
    pub mood: Mood,
    /// 1 (barely) to 10 (overwhelming).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    /// Time of day or timestamp as supplied by the model.
    pub time: String,
    pub repeat: Repeat,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of an appointment request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// A request to book a session with a therapist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub id: Uuid,
    pub user_id: String,
    pub preferred_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    pub session_type: SessionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub urgent: bool,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// A habit the user wants to track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub frequency: HabitFrequency,
    pub reminder: bool,
    pub streak: u32,
    pub created_at: DateTime<Utc>,
}
