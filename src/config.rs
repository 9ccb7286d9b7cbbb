//! TOML-based project configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::{Brand, EvaporatorKind, Orientation};
use crate::diversity::{DiversityToken, ProductFamily};
use crate::provider::{
    BuiltinProvider, CatalogProvider, FactorProvider, FactorSources, LoadedData, TomlCatalogFile,
    TomlFactorFile, load_data,
};
use crate::sizing::SizingSession;

/// Top-level project configuration parsed from TOML.
///
/// All tables are optional. Load from TOML with
/// [`ProjectConfig::from_toml_file`] or start from a preset with
/// [`ProjectConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Brand, orientation and diversity selection.
    #[serde(default)]
    pub project: ProjectSection,
    /// External data files.
    #[serde(default)]
    pub data: DataSection,
    /// Evaporator list, in entry order.
    #[serde(default)]
    pub evaporators: Vec<EvaporatorConfig>,
}

/// Sizing inputs shared by every evaporator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    /// Free-form project label.
    pub name: String,
    /// Brand the evaporator capacities are looked up for.
    pub brand: Brand,
    pub orientation: Orientation,
    /// Diversity token: a category, a number, or `max`.
    pub diversity: String,
    /// Factor table the token is resolved against.
    pub family: ProductFamily,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            brand: Brand::Samsung,
            orientation: Orientation::Vertical,
            diversity: "corporate".to_string(),
            family: ProductFamily::Vrf,
        }
    }
}

/// Paths to catalog and factor files. Built-in data is used when unset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSection {
    pub catalog: Option<PathBuf>,
    pub factors: Option<PathBuf>,
    /// Secondary factor file, tried once if `factors` fails.
    pub legacy_factors: Option<PathBuf>,
}

/// One evaporator line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaporatorConfig {
    pub kind: EvaporatorKind,
    /// Brand-specific nominal rating (must be > 0).
    pub nominal: u32,
    /// Number of units (must be >= 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl DataSection {
    /// Joins relative paths onto `base`. Absolute and empty paths are kept.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.catalog, &mut self.factors, &mut self.legacy_factors]
            .into_iter()
            .flatten()
        {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
    }
}

fn default_quantity() -> u32 {
    1
}

impl EvaporatorConfig {
    pub fn new(kind: EvaporatorKind, nominal: u32, quantity: u32) -> Self {
        Self {
            kind,
            nominal,
            quantity,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"evaporators[0].quantity"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ProjectConfig {
    /// Returns the office preset: corporate diversity, vertical units, mixed indoor units.
    pub fn office() -> Self {
        Self {
            project: ProjectSection {
                name: "Office floor".to_string(),
                ..ProjectSection::default()
            },
            data: DataSection::default(),
            evaporators: vec![
                EvaporatorConfig::new(EvaporatorKind::HiWall, 9, 4),
                EvaporatorConfig::new(EvaporatorKind::HiWall, 12, 2),
                EvaporatorConfig::new(EvaporatorKind::Cassette4Way, 24, 2),
                EvaporatorConfig::new(EvaporatorKind::Ducted, 36, 1),
            ],
        }
    }

    /// Returns the residential preset: residential diversity, horizontal units.
    pub fn residential() -> Self {
        Self {
            project: ProjectSection {
                name: "Residence".to_string(),
                orientation: Orientation::Horizontal,
                diversity: "residential".to_string(),
                ..ProjectSection::default()
            },
            data: DataSection::default(),
            evaporators: vec![
                EvaporatorConfig::new(EvaporatorKind::HiWall, 7, 2),
                EvaporatorConfig::new(EvaporatorKind::HiWall, 9, 2),
                EvaporatorConfig::new(EvaporatorKind::HiWall, 12, 1),
            ],
        }
    }

    /// Returns the maximum-capacity preset: largest unit per brand.
    pub fn max_capacity() -> Self {
        Self {
            project: ProjectSection {
                name: "Maximum capacity".to_string(),
                diversity: "max".to_string(),
                ..ProjectSection::default()
            },
            ..Self::office()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["office", "residential", "max_capacity"];

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "office" => Ok(Self::office()),
            "residential" => Ok(Self::residential()),
            "max_capacity" => Ok(Self::max_capacity()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// Relative `[data]` paths are taken relative to the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "project".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            cfg.data.resolve_relative_to(dir);
        }
        Ok(cfg)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.project.diversity.trim().is_empty() {
            errors.push(ConfigError {
                field: "project.diversity".into(),
                message: "must not be empty".into(),
            });
        }

        for (field, path) in [
            ("data.catalog", &self.data.catalog),
            ("data.factors", &self.data.factors),
            ("data.legacy_factors", &self.data.legacy_factors),
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must not be empty when set".into(),
                });
            }
        }

        for (i, e) in self.evaporators.iter().enumerate() {
            if e.nominal == 0 {
                errors.push(ConfigError {
                    field: format!("evaporators[{i}].nominal"),
                    message: "must be > 0".into(),
                });
            }
            if e.quantity == 0 {
                errors.push(ConfigError {
                    field: format!("evaporators[{i}].quantity"),
                    message: "must be >= 1".into(),
                });
            }
        }

        errors
    }

    /// Parsed diversity token.
    pub fn diversity_token(&self) -> DiversityToken {
        DiversityToken::parse(&self.project.diversity)
    }

    /// Loads catalog and factors from the configured files, or built-in data.
    pub fn load_data(&self) -> LoadedData {
        let catalog: Box<dyn CatalogProvider> = match &self.data.catalog {
            Some(path) => Box::new(TomlCatalogFile::new(path)),
            None => Box::new(BuiltinProvider),
        };
        let primary: Box<dyn FactorProvider> = match &self.data.factors {
            Some(path) => Box::new(TomlFactorFile::new(path)),
            None => Box::new(BuiltinProvider),
        };
        let legacy = self.data.legacy_factors.as_ref().map(TomlFactorFile::new);

        let sources = FactorSources {
            primary: primary.as_ref(),
            legacy: legacy.as_ref().map(|l| l as &dyn FactorProvider),
        };
        load_data(catalog.as_ref(), sources, self.project.family)
    }

    /// Builds a session holding this project's inputs over `data`.
    pub fn into_session(self, data: LoadedData) -> SizingSession {
        let mut session = data.into_session();
        session.set_brand(self.project.brand);
        session.set_orientation(self.project.orientation);
        session.set_diversity(DiversityToken::parse(&self.project.diversity));
        for e in &self.evaporators {
            session.add_evaporator(e.kind, e.nominal, e.quantity);
        }
        session
    }
}
