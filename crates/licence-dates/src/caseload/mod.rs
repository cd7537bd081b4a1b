//! Caseload CSV import: one row per case with its sentence dates and flags.

mod parser;

use crate::release::CaseRecord;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CaseloadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateCase(String),
}

impl std::fmt::Display for CaseloadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseloadImportError::Io(err) => write!(f, "failed to read caseload export: {}", err),
            CaseloadImportError::Csv(err) => write!(f, "invalid caseload CSV data: {}", err),
            CaseloadImportError::DuplicateCase(case_id) => {
                write!(f, "caseload lists case {} more than once", case_id)
            }
        }
    }
}

impl std::error::Error for CaseloadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaseloadImportError::Io(err) => Some(err),
            CaseloadImportError::Csv(err) => Some(err),
            CaseloadImportError::DuplicateCase(_) => None,
        }
    }
}

impl From<std::io::Error> for CaseloadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CaseloadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CaseloadImporter;

impl CaseloadImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CaseRecord>, CaseloadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CaseRecord>, CaseloadImportError> {
        let cases = parser::parse_records(reader)?;

        if let Some(case_id) = first_duplicate(&cases) {
            return Err(CaseloadImportError::DuplicateCase(case_id));
        }

        tracing::debug!(cases = cases.len(), "imported caseload");
        Ok(cases)
    }
}

fn first_duplicate(cases: &[CaseRecord]) -> Option<String> {
    let mut seen = HashSet::new();
    cases
        .iter()
        .find(|case| !seen.insert(case.case_id.as_str()))
        .map(|case| case.case_id.clone())
}
