//! User-supplied bounds for the click loop.

use thiserror::Error;

pub const DEFAULT_MIN_WAIT_MS: u64 = 1600;
pub const DEFAULT_MAX_WAIT_MS: u64 = 2600;
pub const DEFAULT_MIN_CLICKS: u32 = 1;
pub const DEFAULT_MAX_CLICKS: u32 = 30;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Wait Time and Mouse Clicks need to be non-decimal numbers!")]
    NotAnInteger,
    #[error("Max clicks/Max time cannot be less than Min clicks/Min time!")]
    MaxBelowMin,
}

impl SettingsError {
    /// Title of the dialog that reports this error.
    pub fn caption(&self) -> &'static str {
        match self {
            SettingsError::NotAnInteger => "Invalid input(s)",
            SettingsError::MaxBelowMin => "Max < Min Error",
        }
    }
}

/// Bounds for one run. Waits are milliseconds between clicks, clicks are
/// how many land before the cursor is nudged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickSettings {
    pub min_wait_ms: u64,
    pub max_wait_ms: u64,
    pub min_clicks: u32,
    pub max_clicks: u32,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            min_wait_ms: DEFAULT_MIN_WAIT_MS,
            max_wait_ms: DEFAULT_MAX_WAIT_MS,
            min_clicks: DEFAULT_MIN_CLICKS,
            max_clicks: DEFAULT_MAX_CLICKS,
        }
    }
}

impl ClickSettings {
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.max_clicks < self.min_clicks || self.max_wait_ms < self.min_wait_ms {
            return Err(SettingsError::MaxBelowMin);
        }
        Ok(self)
    }
}

/// Cursor nudge parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JitterSettings {
    /// Pixels the cursor may stray from its center before the center follows it.
    pub radius: i32,
    /// Pause after a move's dwell, before the next burst starts.
    pub settle_ms: u64,
    pub dwell_min_ms: u64,
    pub dwell_max_ms: u64,
}

impl Default for JitterSettings {
    fn default() -> Self {
        Self { radius: 3, settle_ms: 1000, dwell_min_ms: 1000, dwell_max_ms: 4500 }
    }
}

/// The four text fields exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsForm {
    pub min_wait: String,
    pub max_wait: String,
    pub min_clicks: String,
    pub max_clicks: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from(ClickSettings::default())
    }
}

impl From<ClickSettings> for SettingsForm {
    fn from(s: ClickSettings) -> Self {
        Self {
            min_wait: s.min_wait_ms.to_string(),
            max_wait: s.max_wait_ms.to_string(),
            min_clicks: s.min_clicks.to_string(),
            max_clicks: s.max_clicks.to_string(),
        }
    }
}

impl SettingsForm {
    /// Every field must be an integer before the min/max pairs are compared.
    pub fn parse(&self) -> Result<ClickSettings, SettingsError> {
        let settings = ClickSettings {
            min_wait_ms: field(&self.min_wait)?,
            max_wait_ms: field(&self.max_wait)?,
            min_clicks: field(&self.min_clicks)?,
            max_clicks: field(&self.max_clicks)?,
        };
        settings.validate()
    }
}

/// Fields are unsigned, so a negative number fails here too and gets the
/// same "non-decimal numbers" dialog as any other unparsable text.
fn field<T: std::str::FromStr>(raw: &str) -> Result<T, SettingsError> {
    raw.trim().parse().map_err(|_| SettingsError::NotAnInteger)
}
