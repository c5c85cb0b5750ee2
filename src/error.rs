use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("surface `{surface}`: {source}")]
    Surface {
        surface: String,
        #[source]
        source: Box<ConfigError>,
    },
    #[error("unknown surface preset `{0}`")]
    UnknownPreset(String),
    #[error("unknown surface `{0}`")]
    UnknownSurface(String),
    #[cfg(feature = "toml-config")]
    #[error("failed to parse surface catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }

    pub(crate) fn in_surface(self, surface: &str) -> Self {
        Self::Surface {
            surface: surface.to_string(),
            source: Box::new(self),
        }
    }
}
