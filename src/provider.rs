//! Catalog and diversity-factor providers with fetch-or-fallback loading.
//!
//! A provider failure is never fatal: [`load_data`] substitutes built-in
//! defaults and reports a [`Advisory::DataUnavailable`] notice instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, CondenserEntry, EvaporatorRow, builtin_catalog};
use crate::diversity::{DiversityFactor, FactorError, FactorTable, ProductFamily};
use crate::sizing::{Advisory, DataSet, SizingSession};

/// Failure to obtain data from a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("cannot read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse \"{}\": {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{origin}: {message}")]
    Invalid { origin: String, message: String },
}

impl ProviderError {
    fn invalid(origin: &Path, message: impl ToString) -> Self {
        ProviderError::Invalid {
            origin: origin.display().to_string(),
            message: message.to_string(),
        }
    }
}

/// Source of the product catalog.
pub trait CatalogProvider: Send + Sync {
    /// Loads the complete catalog.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when the source is unreachable or its rows
    /// do not form a valid catalog.
    fn load_catalog(&self) -> Result<Catalog, ProviderError>;
}

/// Source of diversity-factor tables.
pub trait FactorProvider: Send + Sync {
    /// Loads the factor table for one product family.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` when the source is unreachable, holds no
    /// rows for `family`, or holds invalid rows.
    fn load_factors(&self, family: ProductFamily) -> Result<FactorTable, ProviderError>;
}

/// Always succeeds with the built-in reference data.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl CatalogProvider for BuiltinProvider {
    fn load_catalog(&self) -> Result<Catalog, ProviderError> {
        Ok(builtin_catalog())
    }
}

impl FactorProvider for BuiltinProvider {
    fn load_factors(&self, family: ProductFamily) -> Result<FactorTable, ProviderError> {
        Ok(FactorTable::builtin(family))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    evaporators: Vec<EvaporatorRow>,
    #[serde(default)]
    condensers: Vec<CondenserEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FactorRow {
    family: ProductFamily,
    name: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FactorFile {
    #[serde(default)]
    factors: Vec<FactorRow>,
}

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ProviderError> {
    let content = fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ProviderError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Catalog stored as a TOML file with `[[evaporators]]` and `[[condensers]]` arrays.
#[derive(Debug, Clone)]
pub struct TomlCatalogFile {
    path: PathBuf,
}

impl TomlCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses catalog TOML without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` for malformed TOML, invalid rows, or a
    /// file without condensers.
    pub fn parse(origin: &Path, content: &str) -> Result<Catalog, ProviderError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| ProviderError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::build(origin, file)
    }

    fn build(origin: &Path, file: CatalogFile) -> Result<Catalog, ProviderError> {
        if file.condensers.is_empty() {
            return Err(ProviderError::invalid(origin, "no condensers defined"));
        }
        Catalog::from_rows(&file.evaporators, file.condensers)
            .map_err(|e: CatalogError| ProviderError::invalid(origin, e))
    }
}

impl CatalogProvider for TomlCatalogFile {
    fn load_catalog(&self) -> Result<Catalog, ProviderError> {
        let file: CatalogFile = read_toml(&self.path)?;
        Self::build(&self.path, file)
    }
}

/// Factor tables stored as a TOML file with a `[[factors]]` array.
///
/// Each row names its family, so one file can hold both tables.
#[derive(Debug, Clone)]
pub struct TomlFactorFile {
    path: PathBuf,
}

impl TomlFactorFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses factor TOML for one family without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` for malformed TOML, invalid rows, or no
    /// rows for `family`.
    pub fn parse(
        origin: &Path,
        content: &str,
        family: ProductFamily,
    ) -> Result<FactorTable, ProviderError> {
        let file: FactorFile = toml::from_str(content).map_err(|e| ProviderError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::build(origin, file, family)
    }

    fn build(
        origin: &Path,
        file: FactorFile,
        family: ProductFamily,
    ) -> Result<FactorTable, ProviderError> {
        let rows: Vec<DiversityFactor> = file
            .factors
            .into_iter()
            .filter(|r| r.family == family)
            .map(|r| DiversityFactor {
                name: r.name,
                value: r.value,
            })
            .collect();
        if rows.is_empty() {
            return Err(ProviderError::invalid(
                origin,
                format!("no {family} factors defined"),
            ));
        }
        FactorTable::new(family, rows).map_err(|e: FactorError| ProviderError::invalid(origin, e))
    }
}

impl FactorProvider for TomlFactorFile {
    fn load_factors(&self, family: ProductFamily) -> Result<FactorTable, ProviderError> {
        let file: FactorFile = read_toml(&self.path)?;
        Self::build(&self.path, file, family)
    }
}

/// Factor sources in priority order: a primary and an optional legacy source.
///
/// Each source is tried exactly once.
pub struct FactorSources<'a> {
    pub primary: &'a dyn FactorProvider,
    pub legacy: Option<&'a dyn FactorProvider>,
}

impl<'a> FactorSources<'a> {
    pub fn single(primary: &'a dyn FactorProvider) -> Self {
        Self {
            primary,
            legacy: None,
        }
    }

    fn load(&self, family: ProductFamily) -> Result<FactorTable, ProviderError> {
        match self.primary.load_factors(family) {
            Ok(table) => Ok(table),
            Err(primary_err) => match self.legacy {
                Some(legacy) => {
                    tracing::warn!(error = %primary_err, "primary factor source failed, trying legacy");
                    legacy.load_factors(family)
                }
                None => Err(primary_err),
            },
        }
    }
}

/// Data available to a sizing session after loading.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub catalog: Catalog,
    pub factors: FactorTable,
    /// One notice per data set that fell back to built-in defaults.
    pub advisories: Vec<Advisory>,
}

impl LoadedData {
    /// Built-in data only, as used before any provider has answered.
    pub fn builtin(family: ProductFamily) -> Self {
        Self {
            catalog: builtin_catalog(),
            factors: FactorTable::builtin(family),
            advisories: Vec::new(),
        }
    }

    pub fn into_session(self) -> SizingSession {
        SizingSession::new(self.catalog, self.factors).with_load_advisories(self.advisories)
    }
}

/// Loads catalog and factors independently, falling back to built-in data on failure.
///
/// The two loads run on separate threads; neither waits on or affects the
/// other. No retries are made.
pub fn load_data(
    catalog: &dyn CatalogProvider,
    factors: FactorSources<'_>,
    family: ProductFamily,
) -> LoadedData {
    let (catalog_result, factor_result) = thread::scope(|s| {
        let c = s.spawn(|| catalog.load_catalog());
        let f = s.spawn(|| factors.load(family));
        (join_or_panic_message(c), join_or_panic_message(f))
    });

    let mut advisories = Vec::new();
    let catalog = catalog_result.unwrap_or_else(|reason| {
        tracing::warn!(%reason, "catalog unavailable, using built-in catalog");
        advisories.push(Advisory::DataUnavailable {
            data: DataSet::Catalog,
            reason,
        });
        builtin_catalog()
    });
    let factors = factor_result.unwrap_or_else(|reason| {
        tracing::warn!(%reason, %family, "factors unavailable, using built-in factors");
        advisories.push(Advisory::DataUnavailable {
            data: DataSet::Factors,
            reason,
        });
        FactorTable::builtin(family)
    });

    tracing::info!(
        condensers = catalog.condensers.len(),
        evaporators = catalog.evaporators.len(),
        factors = factors.factors().len(),
        degraded = advisories.len(),
        "data loaded"
    );
    LoadedData {
        catalog,
        factors,
        advisories,
    }
}

fn join_or_panic_message<T>(
    handle: thread::ScopedJoinHandle<'_, Result<T, ProviderError>>,
) -> Result<T, String> {
    match handle.join() {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(_) => Err("provider panicked".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Brand, Orientation};

    struct Offline;

    impl CatalogProvider for Offline {
        fn load_catalog(&self) -> Result<Catalog, ProviderError> {
            Err(ProviderError::Invalid {
                origin: "remote".into(),
                message: "offline".into(),
            })
        }
    }

    impl FactorProvider for Offline {
        fn load_factors(&self, _family: ProductFamily) -> Result<FactorTable, ProviderError> {
            Err(ProviderError::Invalid {
                origin: "remote".into(),
                message: "offline".into(),
            })
        }
    }

    const CATALOG: &str = r#"
[[evaporators]]
brand = "samsung"
kind = "hi-wall"
nominal = 7
real = 7034.0

[[condensers]]
brand = "samsung"
orientation = "vertical"
capacity_rating = 8
real_capacity = 76400.0
voltage = "380"
model = "AM080BXVGGH"
"#;

    const FACTORS: &str = r#"
[[factors]]
family = "vrf"
name = "Corporativo"
value = 1.10

[[factors]]
family = "vrf"
name = "Residencial"
value = 145

[[factors]]
family = "multi-split"
name = "Residencial"
value = 1.40
"#;

    #[test]
    fn parses_catalog_file() {
        let c = TomlCatalogFile::parse(Path::new("mem"), CATALOG).unwrap();
        assert_eq!(c.condensers.entries(Brand::Samsung, Orientation::Vertical).len(), 1);
        assert_eq!(c.evaporators.len(), 1);
    }

    #[test]
    fn catalog_without_condensers_is_invalid() {
        let err = TomlCatalogFile::parse(Path::new("mem"), "").unwrap_err();
        assert!(matches!(err, ProviderError::Invalid { .. }));
    }

    #[test]
    fn unknown_catalog_field_is_parse_error() {
        let err = TomlCatalogFile::parse(Path::new("mem"), "[[heaters]]\nx = 1\n").unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn evaporator_rows_reject_model_field() {
        let content = "[[evaporators]]\nbrand = \"samsung\"\nkind = \"hi-wall\"\n\
                       nominal = 7\nreal = 7034.0\nmodel = \"AR07\"\n";
        let err = TomlCatalogFile::parse(Path::new("mem"), content).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn factor_file_filters_by_family() {
        let vrf = TomlFactorFile::parse(Path::new("mem"), FACTORS, ProductFamily::Vrf).unwrap();
        assert_eq!(vrf.factors().len(), 2);
        assert_eq!(vrf.factors()[0].percent(), 110.0);

        let multi =
            TomlFactorFile::parse(Path::new("mem"), FACTORS, ProductFamily::MultiSplit).unwrap();
        assert_eq!(multi.factors().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TomlCatalogFile::new("/nonexistent/catalog.toml")
            .load_catalog()
            .unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.toml"));
    }

    #[test]
    fn failures_fall_back_to_builtin_with_one_advisory_each() {
        let data = load_data(&Offline, FactorSources::single(&Offline), ProductFamily::Vrf);
        assert_eq!(data.catalog, builtin_catalog());
        assert_eq!(data.factors, FactorTable::builtin(ProductFamily::Vrf));
        assert_eq!(data.advisories.len(), 2);
    }

    #[test]
    fn loads_are_independent() {
        let data = load_data(
            &Offline,
            FactorSources::single(&BuiltinProvider),
            ProductFamily::Vrf,
        );
        assert_eq!(data.advisories.len(), 1);
        assert!(matches!(
            data.advisories[0],
            Advisory::DataUnavailable {
                data: DataSet::Catalog,
                ..
            }
        ));
    }

    #[test]
    fn legacy_source_used_once_when_primary_fails() {
        let sources = FactorSources {
            primary: &Offline,
            legacy: Some(&BuiltinProvider),
        };
        let data = load_data(&BuiltinProvider, sources, ProductFamily::MultiSplit);
        assert!(data.advisories.is_empty());
        assert_eq!(data.factors.family(), ProductFamily::MultiSplit);
    }
}
