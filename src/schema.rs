use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// WGS84
pub const SRID: i32 = 4326;

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub lat: f64,
  pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
  pub id: i32,
  pub title: String,
  pub description: Option<String>,
  pub category: Option<String>,
  pub author_name: Option<String>,
  pub contact_phone: Option<String>,
  pub image_url: Option<String>,
  pub date: Option<NaiveDate>,
  pub supports: i32,
  pub location: Location,
}

#[derive(Debug, Clone)]
pub struct NewReport {
  pub title: String,
  pub description: String,
  pub category: String,
  pub author_name: String,
  pub contact_phone: String,
  pub image_url: String,
  pub date: NaiveDate,
  pub location: Location,
}

impl NewReport {
  /// `supports` always starts at zero.
  pub fn into_report(self, id: i32) -> Report {
    Report {
      id,
      title: self.title,
      description: Some(self.description),
      category: Some(self.category),
      author_name: Some(self.author_name),
      contact_phone: Some(self.contact_phone),
      image_url: Some(self.image_url),
      date: Some(self.date),
      supports: 0,
      location: self.location,
    }
  }
}
