use crate::domain::error::DomainError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Settings remembered between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKey {
    SendGridKey,
    NotificationAddress,
    ServerId,
    SleepMinutes,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 4] = [
        PreferenceKey::SendGridKey,
        PreferenceKey::NotificationAddress,
        PreferenceKey::ServerId,
        PreferenceKey::SleepMinutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::SendGridKey => "sendgrid_key",
            PreferenceKey::NotificationAddress => "notification_address",
            PreferenceKey::ServerId => "server_id",
            PreferenceKey::SleepMinutes => "sleep_minutes",
        }
    }

    /// API keys are never echoed back in full.
    pub fn is_secret(&self) -> bool {
        matches!(self, PreferenceKey::SendGridKey)
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("Unknown preference: {s}"))
    }
}

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: PreferenceKey) -> Result<Option<String>, DomainError>;
    fn set(&self, key: PreferenceKey, value: &str) -> Result<(), DomainError>;
    /// Returns whether a value was stored.
    fn remove(&self, key: PreferenceKey) -> Result<bool, DomainError>;
}
