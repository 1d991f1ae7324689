use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("window failed: {0}")]
    Gui(#[from] eframe::Error),
}
