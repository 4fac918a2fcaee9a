use super::ReportStore;
use crate::{
  error::Result,
  schema::{NewReport, Report},
};
use std::sync::Mutex;

#[derive(Default)]
struct Rows {
  last_id: i32,
  reports: Vec<Report>,
}

/// Keeps rows in process, for handler tests.
#[derive(Default)]
pub struct MemoryStore {
  rows: Mutex<Rows>,
}

impl MemoryStore {
  pub fn len(&self) -> usize {
    self.rows.lock().unwrap().reports.len()
  }
}

impl ReportStore for MemoryStore {
  fn init_schema(&self, _with_extension: bool) -> Result<()> {
    Ok(())
  }

  fn insert(&self, report: NewReport) -> Result<Report> {
    let mut rows = self.rows.lock().unwrap();
    rows.last_id += 1;
    let report = report.into_report(rows.last_id);
    rows.reports.push(report.clone());
    Ok(report)
  }

  fn list(&self) -> Result<Vec<Report>> {
    Ok(self.rows.lock().unwrap().reports.clone())
  }

  fn delete(&self, id: i32) -> Result<bool> {
    let mut rows = self.rows.lock().unwrap();
    let before = rows.reports.len();
    rows.reports.retain(|report| report.id != id);
    Ok(rows.reports.len() != before)
  }
}
