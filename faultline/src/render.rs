use std::fmt::{self, Write as _};

use faultline_code::{Classifier, ErrorCategory, ErrorType, classify::error_category, codes};
use faultline_core::{Code, Registry};
use serde::Serialize;

/// One registered code with its classification
#[derive(Debug, Serialize)]
pub struct CodeRow {
    pub code: Code,
    /// Constant name for codes from the fixed table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub status: u16,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub category: ErrorCategory,
}

impl CodeRow {
    fn new(classifier: Classifier<'_>, code: Code, message: String) -> Self {
        Self {
            code,
            name: codes::spec_for(code).map(|spec| spec.name),
            status: classifier.registry().http_status(code).as_u16(),
            message,
            error_type: classifier.error_type(code),
            category: error_category(code),
        }
    }

    fn name(&self) -> &str {
        self.name.unwrap_or("-")
    }
}

/// Rows for every registered code, ordered by code
pub fn rows(registry: &Registry) -> Vec<CodeRow> {
    let classifier = Classifier::new(registry);

    registry
        .coders()
        .into_iter()
        .map(|coder| CodeRow::new(classifier, coder.code(), coder.message().to_owned()))
        .collect()
}

pub fn table(rows: &[CodeRow]) -> Result<String, fmt::Error> {
    let name_width = rows.iter().map(|row| row.name().len()).max().unwrap_or(0).max("NAME".len());
    let mut out = String::new();

    writeln!(out, "{:<7}  {:<name_width$}  {:<6}  {:<8}  MESSAGE", "CODE", "NAME", "STATUS", "TYPE")?;

    for row in rows {
        let error_type: &str = row.error_type.as_ref();
        writeln!(
            out,
            "{:<7}  {:<name_width$}  {:<6}  {:<8}  {}",
            row.code,
            row.name(),
            row.status,
            error_type,
            row.message
        )?;
    }

    Ok(out)
}

pub fn markdown(rows: &[CodeRow]) -> Result<String, fmt::Error> {
    let mut out = String::from("| Code | Name | HTTP status | Type | Category | Message |\n");
    out.push_str("|------|------|-------------|------|----------|---------|\n");

    for row in rows {
        writeln!(
            out,
            "| {} | `{}` | {} | {} | {} | {} |",
            row.code,
            row.name(),
            row.status,
            row.error_type,
            row.category,
            row.message.replace('|', "\\|")
        )?;
    }

    Ok(out)
}

pub fn json(rows: &[CodeRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// Description of a single code, registered or not
pub fn explain(registry: &Registry, code: Code) -> Result<String, fmt::Error> {
    let classifier = Classifier::new(registry);
    let registered = registry.lookup(code);
    let row = CodeRow::new(
        classifier,
        code,
        registered.as_ref().map_or_else(String::new, |coder| coder.message().to_owned()),
    );

    let mut out = String::new();
    writeln!(out, "code:     {}", row.code)?;
    writeln!(out, "name:     {}", row.name())?;

    if registered.is_some() {
        writeln!(out, "status:   {}", row.status)?;
        writeln!(out, "message:  {}", row.message)?;
    } else {
        writeln!(out, "status:   {} (not registered)", row.status)?;
    }

    writeln!(out, "type:     {}", row.error_type)?;
    writeln!(out, "category: {}", row.category)?;

    Ok(out)
}
