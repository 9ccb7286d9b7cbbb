//! CSV export for sizing reports and evaporator lists.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::{CondenserMatch, EvaporatorSelection, SizingReport};

/// Column header for the report export.
const REPORT_HEADER: &str = "brand,orientation,slot,total_demand,selected_pct,applied_pct,\
                             required_capacity,model,capacity_rating,voltage,real_capacity,unit";

/// Column header for the evaporator list export.
const EVAPORATOR_HEADER: &str = "kind,nominal,real_capacity,quantity,line_capacity,approximated";

/// Exports a report to a CSV file at the given path.
///
/// Writes one row per brand and match slot (`ideal`, `one_below`,
/// `one_above`). Empty slots keep their row with blank unit columns.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_report_csv(report: &SizingReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_report_csv(report, io::BufWriter::new(file))
}

/// Writes a report as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_report_csv(report: &SizingReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(REPORT_HEADER.split(',').map(str::trim))?;

    for b in &report.brands {
        let slots: [(&str, Option<&CondenserMatch>); 3] = [
            ("ideal", b.ideal_match.as_ref()),
            ("one_below", b.one_below.as_ref()),
            ("one_above", b.one_above.as_ref()),
        ];
        for (slot, m) in slots {
            let (model, rating, voltage, real) = match m {
                Some(m) => (
                    m.entry.model.clone(),
                    m.entry.capacity_rating.to_string(),
                    m.entry.voltage.clone().unwrap_or_default(),
                    format!("{:.1}", m.entry.real_capacity),
                ),
                None => Default::default(),
            };
            wtr.write_record(&[
                b.brand.label().to_string(),
                b.orientation.label().to_string(),
                slot.to_string(),
                format!("{:.1}", b.total_demand),
                format!("{:.2}", b.factor.selected_pct),
                format!("{:.2}", b.factor.applied_pct),
                format!("{:.1}", b.required_minimum_capacity),
                model,
                rating,
                voltage,
                real,
                b.brand.capacity_unit().to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Exports an evaporator list to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_evaporators_csv(selections: &[EvaporatorSelection], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_evaporators_csv(selections, io::BufWriter::new(file))
}

/// Writes an evaporator list as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_evaporators_csv(
    selections: &[EvaporatorSelection],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(EVAPORATOR_HEADER.split(','))?;

    for s in selections {
        wtr.write_record(&[
            s.kind.slug().to_string(),
            s.nominal.to_string(),
            format!("{:.1}", s.real_capacity),
            s.quantity.to_string(),
            format!("{:.1}", s.line_capacity()),
            s.approximated.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
