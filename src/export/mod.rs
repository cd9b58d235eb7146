//! Spreadsheet and JSON export of a business case
//!
//! The CSV layout is a sequence of titled sections separated by blank rows:
//! executive summary, assumptions, baseline vs. future, benefit breakdown,
//! projection, corporate P&L and amortization.

pub mod format;

use std::path::Path;

use csv::WriterBuilder;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::calculator::BenefitCalculation;
use crate::comparison::compare;
use crate::data::schema::{CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};
use crate::data::BusinessCaseData;
pub use format::{
    format_cell, format_compact_currency, format_currency_full, format_large_number,
    format_months, format_percent, NOT_AVAILABLE,
};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

type Rows = Vec<Vec<String>>;

fn title(rows: &mut Rows, name: &str) {
    if !rows.is_empty() {
        rows.push(vec![]);
    }
    rows.push(vec![name.to_string()]);
}

fn header(rows: &mut Rows, cols: &[&str]) {
    rows.push(cols.iter().map(|c| c.to_string()).collect());
}

fn line(rows: &mut Rows, label: &str, values: &[f64]) {
    let mut row = Vec::with_capacity(values.len() + 1);
    row.push(label.to_string());
    row.extend(values.iter().map(|v| format_cell(*v)));
    rows.push(row);
}

fn executive_summary(rows: &mut Rows, r: &BenefitCalculation) {
    let (c, s) = (&r.roi.corporate, &r.roi.system);
    title(rows, "Executive Summary");
    header(rows, &["Metric", "Corporate", "System-wide"]);
    line(rows, "Annual benefit", &[c.annual_benefit, s.annual_benefit]);
    line(rows, "Implementation cost", &[r.roi.implementation_cost, r.roi.implementation_cost]);
    line(rows, "Payback (months)", &[c.payback_months, s.payback_months]);
    line(rows, "First-year ROI (%)", &[c.first_year_roi_pct, s.first_year_roi_pct]);
    line(rows, "Five-year ROI (%)", &[c.five_year_roi_pct, s.five_year_roi_pct]);
    line(
        rows,
        "Five-year cumulative benefit",
        &[c.five_year_cumulative_benefit, s.five_year_cumulative_benefit],
    );
    line(
        rows,
        "Annual benefit per clinic",
        &[c.per_clinic_annual_benefit, s.per_clinic_annual_benefit],
    );
    line(rows, "Including expansion", &[f64::NAN, r.including_expansion_total]);
}

fn assumptions(rows: &mut Rows, data: &BusinessCaseData) -> Result<(), ExportError> {
    title(rows, "Assumptions");
    header(rows, &["Field", "Value"]);
    if let Value::Object(fields) = serde_json::to_value(data)? {
        for (key, value) in fields {
            let cell = match value {
                Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_cell),
                Value::Array(items) => items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
                other => other.to_string(),
            };
            rows.push(vec![key, cell]);
        }
    }
    Ok(())
}

fn comparison(rows: &mut Rows, data: &BusinessCaseData) {
    title(rows, "Baseline vs Future");
    header(rows, &["Category", "Metric", "Baseline", "Future", "Change"]);
    for m in compare(data) {
        rows.push(vec![
            m.category.to_string(),
            m.label.to_string(),
            format_cell(m.baseline),
            format_cell(m.future),
            format_cell(m.change()),
        ]);
    }
}

fn breakdown(rows: &mut Rows, r: &BenefitCalculation) {
    title(rows, "Benefit Breakdown");
    header(rows, &["Category", "Total", "Corporate", "Franchise"]);
    for (name, split) in r.allocation.categories() {
        line(rows, name, &[split.total, split.corporate, split.franchise]);
    }
    line(
        rows,
        "Total",
        &[
            r.allocation.total_annual_benefits,
            r.allocation.corporate_annual_benefits,
            r.allocation.franchise_annual_benefits,
        ],
    );
}

fn projection(rows: &mut Rows, r: &BenefitCalculation) {
    title(rows, "Projection");
    header(
        rows,
        &["Year", "Clinics", "Benefits", "Recurring Expenses", "Net Benefit", "Cumulative Benefit"],
    );
    for y in &r.projection {
        line(
            rows,
            &y.year.to_string(),
            &[y.clinic_count, y.benefits, y.recurring_expenses, y.net_benefit, y.cumulative_benefit],
        );
    }
    line(rows, "Net after implementation", &[r.five_year_net_benefit]);
}

fn corporate_pnl(rows: &mut Rows, r: &BenefitCalculation) {
    let p = &r.corporate_pnl;
    title(rows, "Corporate P&L");
    header(rows, &["Line", "Amount"]);
    line(rows, "Franchise revenue benefit", &[p.franchise_revenue_benefit]);
    line(rows, "Gross royalty revenue", &[p.gross_royalty_revenue]);
    line(rows, "R&D cost of revenue", &[p.rd_cost_of_revenue]);
    line(rows, "Net royalty revenue", &[p.net_royalty_revenue]);
    line(rows, "Merchant fees", &[p.merchant_fees]);
    line(rows, "Marketing fund fees", &[p.marketing_fund_fees]);
    line(rows, "Corporate IT savings", &[p.corporate_it_savings]);
    line(rows, "Expansion franchise fees", &[r.expansion.franchise_fees]);
    line(rows, "Expansion royalty revenue", &[r.expansion.royalty_revenue]);
}

fn amortization(rows: &mut Rows, r: &BenefitCalculation) {
    title(rows, "Amortization");
    header(
        rows,
        &[
            "Year",
            "Net Royalty",
            "IT Savings",
            "Amortization",
            "Expensed OpEx",
            "Net Impact",
            "Cumulative",
        ],
    );
    for a in &r.amortization {
        line(
            rows,
            &a.year.to_string(),
            &[
                a.net_royalty_impact,
                a.it_savings,
                a.amortization,
                a.expensed_opex,
                a.net_impact,
                a.cumulative_impact,
            ],
        );
    }
}

/// Render the business case as a multi-section CSV document
pub fn to_csv(data: &BusinessCaseData, benefits: &BenefitCalculation) -> Result<String, ExportError> {
    let mut rows = Rows::new();
    executive_summary(&mut rows, benefits);
    assumptions(&mut rows, data)?;
    comparison(&mut rows, data);
    breakdown(&mut rows, benefits);
    projection(&mut rows, benefits);
    corporate_pnl(&mut rows, benefits);
    amortization(&mut rows, benefits);

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(vec![]);
    for row in &rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    tracing::debug!(rows = rows.len(), "Exported business case to CSV");
    Ok(String::from_utf8(bytes)?)
}

/// Write [`to_csv`] output to `path`
pub fn write_csv(
    path: impl AsRef<Path>,
    data: &BusinessCaseData,
    benefits: &BenefitCalculation,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let content = to_csv(data, benefits)?;
    std::fs::write(path, content).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Pretty JSON of the input record and its results
///
/// Sentinel values serialize as `null`.
pub fn to_json(data: &BusinessCaseData, benefits: &BenefitCalculation) -> Result<String, ExportError> {
    let mut inputs = serde_json::to_value(data)?;
    if let Value::Object(ref mut map) = inputs {
        map.insert(SCHEMA_VERSION_KEY.into(), CURRENT_SCHEMA_VERSION.into());
    }
    let mut doc = Map::new();
    doc.insert("inputs".into(), inputs);
    doc.insert("results".into(), serde_json::to_value(benefits)?);
    Ok(serde_json::to_string_pretty(&Value::Object(doc))?)
}
