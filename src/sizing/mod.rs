//! Demand aggregation, condenser selection and the sizing session.

pub mod advisory;
/// Evaporator list and total demand.
pub mod demand;
/// Condenser search over one brand/orientation table.
pub mod engine;
pub mod report;
pub mod session;

pub use advisory::{Advisory, DataSet};
pub use demand::{EvaporatorSelection, SelectionList, aggregate};
pub use engine::{BrandSelection, CondenserMatch, select};
pub use report::SizingReport;
pub use session::{SizingSession, compute_selection};
