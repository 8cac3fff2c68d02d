use std::path::PathBuf;

use dirs::preference_dir;

use crate::error::AppError;

pub const APP_NAME: &str = "mazetrace";
pub const SETTINGS_FILE: &str = "settings.ron";

pub fn base_path() -> Result<PathBuf, AppError> {
    preference_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or(AppError::NoPreferenceDir)
}
