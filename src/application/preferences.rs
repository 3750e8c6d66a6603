use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::hunt::HuntSettings;
use crate::domain::error::DomainError;
use crate::domain::ports::operator_prompt::OperatorPrompt;
use crate::domain::ports::preference_store::{PreferenceKey, PreferenceStore};
use crate::domain::values::server::Server;

#[derive(Debug, Serialize)]
pub struct PreferenceEntry {
    pub key: PreferenceKey,
    pub value: Option<String>,
}

/// Everything the hunt command needs from persisted preferences.
#[derive(Debug, Clone)]
pub struct ResolvedPreferences {
    pub sendgrid_key: String,
    pub notification_address: String,
    pub server_id: String,
    pub settings: HuntSettings,
}

pub struct PreferencesUseCase {
    store: Arc<dyn PreferenceStore>,
}

impl PreferencesUseCase {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, key: PreferenceKey) -> Result<Option<String>, DomainError> {
        self.store.get(key)
    }

    /// Validates and normalizes before storing. Returns the stored value.
    pub fn set(&self, key: PreferenceKey, value: &str) -> Result<String, DomainError> {
        let value = normalize(key, value)?;
        self.store.set(key, &value)?;
        info!(key = %key, "Successfully saved preference");
        Ok(value)
    }

    pub fn clear(&self, key: PreferenceKey) -> Result<bool, DomainError> {
        self.store.remove(key)
    }

    /// All keys, with secrets masked.
    pub fn list(&self) -> Result<Vec<PreferenceEntry>, DomainError> {
        PreferenceKey::ALL
            .into_iter()
            .map(|key| {
                let value = self.store.get(key)?.map(|v| {
                    if key.is_secret() {
                        mask(&v)
                    } else {
                        v
                    }
                });
                Ok(PreferenceEntry { key, value })
            })
            .collect()
    }

    /// The stored value, or one solicited from the operator and stored.
    pub fn resolve(
        &self,
        key: PreferenceKey,
        prompt: &dyn OperatorPrompt,
    ) -> Result<String, DomainError> {
        if let Some(value) = self.store.get(key)? {
            return Ok(value);
        }
        let answer = match key {
            PreferenceKey::SendGridKey => prompt.ask("Paste your SendGrid API key and press enter.")?,
            PreferenceKey::NotificationAddress => {
                prompt.ask("Type the email address to notify and press enter.")?
            }
            PreferenceKey::ServerId => {
                let names = Server::names();
                prompt.choose(
                    &format!("Type the server name and press enter ({}).", names.join(", ")),
                    &names,
                )?
            }
            PreferenceKey::SleepMinutes => prompt
                .ask_number(
                    "Type the number of minutes to wait between requests and press enter.",
                    1,
                )?
                .to_string(),
        };
        self.set(key, &answer)
    }

    pub fn resolve_all(&self, prompt: &dyn OperatorPrompt) -> Result<ResolvedPreferences, DomainError> {
        let sendgrid_key = self.resolve(PreferenceKey::SendGridKey, prompt)?;
        let notification_address = self.resolve(PreferenceKey::NotificationAddress, prompt)?;
        let server_id = self.resolve(PreferenceKey::ServerId, prompt)?;
        let minutes = parse_minutes(&self.resolve(PreferenceKey::SleepMinutes, prompt)?)?;
        Ok(ResolvedPreferences {
            sendgrid_key,
            notification_address,
            server_id,
            settings: HuntSettings::from_minutes(minutes)?,
        })
    }
}

fn normalize(key: PreferenceKey, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidConfig(format!("{key} cannot be empty")));
    }
    match key {
        PreferenceKey::ServerId => value
            .parse::<Server>()
            .ok()
            .or_else(|| Server::by_id(value))
            .map(|s| s.id().to_string())
            .ok_or_else(|| DomainError::InvalidConfig(format!("Unknown server: {value}"))),
        PreferenceKey::SleepMinutes => {
            let minutes = parse_minutes(value)?;
            HuntSettings::from_minutes(minutes)?;
            Ok(minutes.to_string())
        }
        PreferenceKey::NotificationAddress => Ok(value.to_lowercase()),
        PreferenceKey::SendGridKey => Ok(value.to_string()),
    }
}

fn parse_minutes(value: &str) -> Result<u64, DomainError> {
    match value.trim().parse::<u64>() {
        Ok(m) if m >= 1 => Ok(m),
        _ => Err(DomainError::InvalidConfig(format!(
            "Must supply an integer greater than 0, got {value}"
        ))),
    }
}

fn mask(secret: &str) -> String {
    let tail: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{tail}")
}
