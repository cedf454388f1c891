use std::sync::Arc;

use tracing::warn;

use crate::storage::StorageBackend;

/// Storage key for the card-pool tracking flag.
pub const CARD_TRACKING_KEY: &str = "cashTrackerCashAppEnabled";

/// Storage key for the display name.
pub const DISPLAY_NAME_KEY: &str = "cashTrackerFullName";

/// User preferences, persisted independently of the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub card_tracking_enabled: bool,
    pub display_name: String,
}

/// Owns the persisted settings records.
///
/// Each setter persists immediately; persistence failures are logged and the
/// in-memory value stays authoritative.
pub struct SettingsStore {
    settings: Settings,
    storage: Arc<dyn StorageBackend>,
}

impl SettingsStore {
    /// Loads persisted settings, defaulting per record on any failure.
    ///
    /// The flag record stores the strings `"true"`/`"false"`; only a literal
    /// `"true"` enables tracking. Loading never raises.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let card_tracking_enabled = match storage.get(CARD_TRACKING_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!("failed to load card tracking flag: {err}");
                false
            }
        };
        let display_name = match storage.get(DISPLAY_NAME_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                warn!("failed to load display name: {err}");
                String::new()
            }
        };
        Self {
            settings: Settings {
                card_tracking_enabled,
                display_name,
            },
            storage,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn card_tracking_enabled(&self) -> bool {
        self.settings.card_tracking_enabled
    }

    pub fn display_name(&self) -> &str {
        &self.settings.display_name
    }

    /// Sets the card-pool tracking flag and persists it.
    pub fn set_card_tracking_enabled(&mut self, enabled: bool) -> &Settings {
        self.settings.card_tracking_enabled = enabled;
        self.put(CARD_TRACKING_KEY, if enabled { "true" } else { "false" });
        &self.settings
    }

    /// Stores the display name, trimmed, and persists it.
    pub fn set_display_name(&mut self, name: &str) -> &Settings {
        let trimmed = name.trim().to_string();
        self.put(DISPLAY_NAME_KEY, &trimmed);
        self.settings.display_name = trimmed;
        &self.settings
    }

    fn put(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.put(key, value) {
            warn!("failed to persist setting {key}: {err}");
        }
    }
}
