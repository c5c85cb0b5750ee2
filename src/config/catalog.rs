use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use super::{SurfaceKind, SwipeConfig};
use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    surfaces: BTreeMap<String, SurfaceOverrides>,
}

/// One `[surfaces.<name>]` table: a base preset plus per-field overrides.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SurfaceOverrides {
    pub preset: Option<String>,
    pub noise_threshold_px: Option<f32>,
    pub reveal_threshold_px: Option<f32>,
    pub commit_distance_px: Option<f32>,
    pub commit_velocity_px_per_ms: Option<f32>,
    pub tap_max_duration_ms: Option<u64>,
    pub vertical_bias: Option<f32>,
    pub damping_factor: Option<f32>,
    pub feedback_saturation_px: Option<f32>,
    pub min_visible_opacity: Option<f32>,
    pub max_opacity: Option<f32>,
    pub rotation_scale: Option<f32>,
}

impl SurfaceOverrides {
    /// Resolves the preset (card when absent), applies overrides and validates.
    pub fn resolve(&self) -> Result<SwipeConfig, ConfigError> {
        let kind = match self.preset.as_deref() {
            Some(name) => SurfaceKind::from_name(name)
                .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?,
            None => SurfaceKind::Card,
        };

        let mut config = SwipeConfig::for_surface(kind);
        override_field(&mut config.noise_threshold_px, self.noise_threshold_px);
        override_field(&mut config.reveal_threshold_px, self.reveal_threshold_px);
        override_field(&mut config.commit_distance_px, self.commit_distance_px);
        override_field(
            &mut config.commit_velocity_px_per_ms,
            self.commit_velocity_px_per_ms,
        );
        override_field(&mut config.tap_max_duration_ms, self.tap_max_duration_ms);
        override_field(&mut config.vertical_bias, self.vertical_bias);
        override_field(&mut config.damping_factor, self.damping_factor);
        override_field(&mut config.feedback_saturation_px, self.feedback_saturation_px);
        override_field(&mut config.min_visible_opacity, self.min_visible_opacity);
        override_field(&mut config.max_opacity, self.max_opacity);
        override_field(&mut config.rotation_scale, self.rotation_scale);

        config.validate()?;
        Ok(config)
    }
}

fn override_field<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Named surface configurations loaded from TOML.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceCatalog {
    surfaces: BTreeMap<String, SwipeConfig>,
}

impl SurfaceCatalog {
    /// Catalog holding one entry per built-in preset, keyed by preset name.
    pub fn builtin() -> Self {
        let surfaces = SurfaceKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_string(), SwipeConfig::for_surface(kind)))
            .collect();
        Self { surfaces }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut surfaces = BTreeMap::new();
        for (name, overrides) in file.surfaces {
            let config = overrides
                .resolve()
                .map_err(|err| err.in_surface(&name))?;
            surfaces.insert(name, config);
        }
        log::debug!("surface catalog loaded: {} surfaces", surfaces.len());
        Ok(Self { surfaces })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn get(&self, name: &str) -> Option<&SwipeConfig> {
        self.surfaces.get(name)
    }

    pub fn require(&self, name: &str) -> Result<SwipeConfig, ConfigError> {
        self.get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownSurface(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
