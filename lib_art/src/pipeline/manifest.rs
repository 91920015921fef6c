use std::collections::HashSet;
use std::path::{Component, Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::ICO_MAX_DIMENSION;
use crate::raster::Rgb;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("an I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("an error occurred while parsing the manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("icon size {0} is outside 1..=256")]
    InvalidIconSize(u32),

    #[error("the manifest lists no applications")]
    NoApps,

    #[error("the application id {0:?} appears more than once")]
    DuplicateApp(String),

    #[error("the application id {0:?} is not a valid file name")]
    InvalidAppId(String),

    #[error("the primary icon {0:?} is not one of the applications")]
    UnknownPrimary(String),

    #[error("the directory {0:?} is not relative to the output root")]
    InvalidDirectory(String),
}

/// Whether `dir` stays below the output root once joined to it.
fn is_relative_subdir(dir: &str) -> bool {
    Path::new(dir)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// One labelled application icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    /// Identifier, also the output file stem
    pub id: String,

    /// Background color
    pub color: Rgb,

    /// Symbol drawn on the icon
    pub letter: char,
}

impl AppSpec {
    pub fn new(id: impl Into<String>, color: Rgb, letter: char) -> Self {
        Self {
            id: id.into(),
            color,
            letter,
        }
    }
}

/// Describes the full set of generated assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetManifest {
    /// Edge length of every application icon
    pub icon_size: u32,

    /// The applications to render icons for
    pub apps: Vec<AppSpec>,

    /// Id of the application whose icon becomes the icon container
    pub primary: String,

    /// Directory for icons, relative to the output root
    pub icon_dir: String,

    /// Directory for installer bitmaps, relative to the output root
    pub installer_dir: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            icon_size: 64,
            apps: vec![
                AppSpec::new("word", Rgb::new(43, 87, 154), 'W'),
                AppSpec::new("excel", Rgb::new(33, 115, 70), 'X'),
                AppSpec::new("powerpoint", Rgb::new(208, 68, 35), 'P'),
                AppSpec::new("access", Rgb::new(164, 55, 58), 'A'),
                AppSpec::new("office", Rgb::new(0, 0, 128), 'O'),
            ],
            primary: "office".to_string(),
            icon_dir: "icons".to_string(),
            installer_dir: "installer".to_string(),
        }
    }
}

impl AssetManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        debug!("Loading manifest from {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&contents)?;

        info!(
            "Loaded manifest {} with {} applications",
            path.display(),
            manifest.apps.len()
        );
        Ok(manifest)
    }

    pub fn from_json(contents: &str) -> Result<Self, ManifestError> {
        let manifest = serde_json::from_str::<AssetManifest>(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.icon_size == 0 || self.icon_size > ICO_MAX_DIMENSION {
            return Err(ManifestError::InvalidIconSize(self.icon_size));
        }
        if self.apps.is_empty() {
            return Err(ManifestError::NoApps);
        }

        let mut seen = HashSet::new();
        for app in &self.apps {
            let valid = !app.id.is_empty()
                && app
                    .id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ManifestError::InvalidAppId(app.id.clone()));
            }
            if !seen.insert(app.id.as_str()) {
                return Err(ManifestError::DuplicateApp(app.id.clone()));
            }
        }

        if self.primary_app().is_none() {
            return Err(ManifestError::UnknownPrimary(self.primary.clone()));
        }

        for dir in [&self.icon_dir, &self.installer_dir] {
            if !is_relative_subdir(dir) {
                return Err(ManifestError::InvalidDirectory(dir.clone()));
            }
        }
        Ok(())
    }

    pub fn primary_app(&self) -> Option<&AppSpec> {
        self.apps.iter().find(|app| app.id == self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let manifest = AssetManifest::default();
        manifest.validate().unwrap();
        assert_eq!(manifest.primary_app().unwrap().letter, 'O');
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let manifest = AssetManifest::from_json(
            r#"{ "apps": [{ "id": "notes", "color": [10, 20, 30], "letter": "N" }], "primary": "notes" }"#,
        )
        .unwrap();

        assert_eq!(manifest.icon_size, 64);
        assert_eq!(manifest.icon_dir, "icons");
        assert_eq!(manifest.apps[0].color, Rgb::new(10, 20, 30));
        assert_eq!(manifest.apps[0].letter, 'N');
    }

    #[test]
    fn test_rejects_unknown_primary() {
        let result = AssetManifest::from_json(
            r#"{ "apps": [{ "id": "word", "color": [1, 2, 3], "letter": "W" }], "primary": "excel" }"#,
        );
        assert!(matches!(result, Err(ManifestError::UnknownPrimary(ref id)) if id == "excel"));
    }

    #[test]
    fn test_rejects_duplicates_and_bad_ids() {
        let mut manifest = AssetManifest::default();
        manifest.apps.push(AppSpec::new("word", Rgb::BLACK, 'W'));
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::DuplicateApp(_))
        ));

        let mut manifest = AssetManifest::default();
        manifest.apps[0].id = "../word".to_string();
        assert!(matches!(
            manifest.validate(),
            Err(ManifestError::InvalidAppId(_))
        ));
    }

    #[test]
    fn test_rejects_icon_size() {
        for size in [0, 257] {
            let manifest = AssetManifest {
                icon_size: size,
                ..Default::default()
            };
            assert!(matches!(
                manifest.validate(),
                Err(ManifestError::InvalidIconSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn test_rejects_directories_outside_root() {
        for dir in ["../icons", "/tmp/icons", "icons/../../escape"] {
            let manifest = AssetManifest {
                icon_dir: dir.to_string(),
                ..Default::default()
            };
            assert!(matches!(
                manifest.validate(),
                Err(ManifestError::InvalidDirectory(ref d)) if d == dir
            ));

            let manifest = AssetManifest {
                installer_dir: dir.to_string(),
                ..Default::default()
            };
            assert!(matches!(
                manifest.validate(),
                Err(ManifestError::InvalidDirectory(_))
            ));
        }

        let manifest = AssetManifest {
            icon_dir: "./assets/icons".to_string(),
            ..Default::default()
        };
        manifest.validate().unwrap();
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AssetManifest::from_json("{ not json"),
            Err(ManifestError::Parse(_))
        ));
    }
}
