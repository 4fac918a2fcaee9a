use crate::{
  error::Result,
  schema::{NewReport, Report},
};

#[cfg(test)]
pub mod memory;
pub mod pg;

pub use pg::PgStore;

/// Persistence for reports. Calls block; run them through `web::block`.
pub trait ReportStore: Send + Sync {
  /// Creates the `reportes` table, and the PostGIS extension if asked to.
  fn init_schema(&self, with_extension: bool) -> Result<()>;

  fn insert(&self, report: NewReport) -> Result<Report>;

  /// All rows, in whatever order storage yields them.
  fn list(&self) -> Result<Vec<Report>>;

  /// `false` if there was no such row; nothing is touched in that case.
  fn delete(&self, id: i32) -> Result<bool>;
}
