//! Settings management for curved screens
//!
//! Handles loading/saving of screen layout XML files.

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::layout::{LayoutConfig, LayoutError};
use crate::scene::{ScreenOptions, Transform};

/// A curved screen as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "CurvedScreen")]
pub struct ScreenSettings {
    /// Root transform in the scene
    #[serde(rename = "transform", default)]
    pub transform: Transform,

    /// Video texture source (URL or file path) shared by all panels
    #[serde(rename = "textureSource", default = "default_texture_source")]
    pub texture_source: String,

    /// Arc geometry
    #[serde(rename = "layout", default)]
    pub layout: LayoutConfig,
}

fn default_texture_source() -> String {
    "video.mp4".to_string()
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            texture_source: default_texture_source(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ScreenSettings {
    /// Path of the settings file in the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("curved-screen");
            p.push("screen.xml");
            p
        })
    }

    /// Load and validate settings from an XML file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let settings: Self = read_xml(path)?;
        settings.layout.validate()?;
        tracing::info!(path = %path.display(), "Loaded screen settings");
        Ok(settings)
    }

    /// Load from the default path, falling back to defaults when the file is missing or unreadable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load screen settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to an XML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        write_xml(self, path)?;
        tracing::info!(path = %path.display(), "Saved screen settings");
        Ok(())
    }

    /// Save settings to the default path, creating the directory if needed
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.save_to_file(&path)?;
        Ok(path)
    }

    /// Builder options for this screen
    pub fn screen_options(&self) -> ScreenOptions<String> {
        ScreenOptions::new(self.texture_source.clone())
            .with_transform(self.transform)
            .with_layout(self.layout.clone())
    }
}

impl LayoutConfig {
    /// Load and validate a standalone layout XML file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let layout: Self = read_xml(path)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Save to a standalone layout XML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        write_xml(self, path)
    }
}

fn read_xml<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let contents = fs::read_to_string(path)?;
    Ok(from_str(&contents)?)
}

fn write_xml<T: Serialize>(value: &T, path: &Path) -> Result<(), SettingsError> {
    let xml = to_string(value)?;
    let formatted = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", xml);
    fs::write(path, formatted)?;
    Ok(())
}

/// Settings-related errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),
    #[error("Could not find config directory")]
    NoConfigDir,
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
