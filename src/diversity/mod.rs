//! Diversity (simultaneity) factor tables and selection resolution.

/// Factor tables per product family.
pub mod factor;
pub mod resolver;

pub use factor::{Category, DiversityFactor, FactorError, FactorTable, ProductFamily};
pub use resolver::{DiversityToken, EffectiveFactor, FactorSource, ResolvedFactor, resolve};
