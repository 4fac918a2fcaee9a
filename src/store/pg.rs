use super::ReportStore;
use crate::{
  config::Config,
  error::Result,
  schema::{Location, NewReport, Report, SRID},
};
use postgres::{NoTls, Row};
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;

pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

const CREATE_TABLE: &str = "
  create table if not exists reportes (
    id           serial primary key,
    title        text not null,
    description  text,
    category     text,
    authorname   text,
    contactphone text,
    imageurl     text,
    date         date,
    supports     integer default 0,
    location     geography(Point, 4326)
  )";

const SELECT_REPORTS: &str = "
  select id,
         title,
         description,
         category,
         authorname,
         contactphone,
         imageurl,
         date,
         supports,
         ST_Y(location::geometry) as lat,
         ST_X(location::geometry) as lng
    from reportes";

/// PostgreSQL + PostGIS over an r2d2 pool. Each call checks out its own
/// connection, which goes back to the pool when the call returns.
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  /// Opens the pool. Must run outside of an async runtime, the sync client starts its own.
  pub fn connect(config: &Config) -> Result<Self> {
    let manager = PostgresConnectionManager::new(config.database_url()?.parse()?, NoTls);
    let pool = Pool::builder().max_size(config.server.pool_size).build(manager)?;
    Ok(PgStore { pool })
  }
}

/// Column type mismatches (a `reportes` table created by someone else) surface as errors.
fn report_from_row(row: &Row) -> Result<Report> {
  Ok(Report {
    id: row.try_get(0)?,
    title: row.try_get(1)?,
    description: row.try_get(2)?,
    category: row.try_get(3)?,
    author_name: row.try_get(4)?,
    contact_phone: row.try_get(5)?,
    image_url: row.try_get(6)?,
    date: row.try_get(7)?,
    supports: row.try_get::<_, Option<i32>>(8)?.unwrap_or(0),
    location: Location {
      lat: row.try_get::<_, Option<f64>>(9)?.unwrap_or(0.0),
      lng: row.try_get::<_, Option<f64>>(10)?.unwrap_or(0.0),
    },
  })
}

impl ReportStore for PgStore {
  fn init_schema(&self, with_extension: bool) -> Result<()> {
    let mut db = self.pool.get()?;
    if with_extension {
      db.batch_execute("create extension if not exists postgis")?;
    }
    db.batch_execute(CREATE_TABLE)?;
    Ok(())
  }

  fn insert(&self, report: NewReport) -> Result<Report> {
    let mut db = self.pool.get()?;
    let mut transaction = db.transaction()?;

    // points are (x, y) = (lng, lat)
    let row = transaction.query_one(
      "insert into reportes (
        title,
        description,
        category,
        authorname,
        contactphone,
        imageurl,
        date,
        supports,
        location
      ) values (
        $1, $2, $3, $4, $5, $6, $7, 0,
        ST_SetSRID(ST_MakePoint($8, $9), $10)::geography
      )
      returning id",
      &[
        &report.title,
        &report.description,
        &report.category,
        &report.author_name,
        &report.contact_phone,
        &report.image_url,
        &report.date,
        &report.location.lng,
        &report.location.lat,
        &SRID,
      ],
    )?;
    let id: i32 = row.try_get(0)?;

    transaction.commit()?;
    Ok(report.into_report(id))
  }

  fn list(&self) -> Result<Vec<Report>> {
    let mut db = self.pool.get()?;
    db.query(SELECT_REPORTS, &[])?.iter().map(report_from_row).collect()
  }

  fn delete(&self, id: i32) -> Result<bool> {
    let mut db = self.pool.get()?;
    let mut transaction = db.transaction()?;

    // dropping an uncommitted transaction rolls it back
    if transaction.query_opt("select id from reportes where id = $1", &[&id])?.is_none() {
      return Ok(false);
    }
    transaction.execute("delete from reportes where id = $1", &[&id])?;

    transaction.commit()?;
    Ok(true)
  }
}
