use crate::{
  config::ServerConfig,
  error::{ErrorKind, Result},
  schema::Location,
};
use error_chain::bail;
use actix_multipart::Multipart;
use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

pub const IMAGE_FIELD: &str = "image";

pub struct Image {
  pub filename: String,
  pub data: Bytes,
}

/// Decoded `multipart/form-data` body: text fields by name, plus the `image` file part.
#[derive(Default)]
pub struct Form {
  fields: HashMap<String, String>,
  pub image: Option<Image>,
}

impl Form {
  /// Parts are held in memory; each one is capped by `max_image_bytes` or `max_field_bytes`.
  pub async fn read(mut payload: Multipart, limits: &ServerConfig) -> Result<Form> {
    let mut form = Form::default();

    while let Some(mut field) = payload.try_next().await? {
      let name = field.name().unwrap_or_default().to_string();
      let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string);

      let limit = match filename {
        Some(_) => limits.max_image_bytes,
        None => limits.max_field_bytes,
      };

      let mut data = BytesMut::new();
      while let Some(chunk) = field.try_next().await? {
        if data.len() + chunk.len() > limit {
          bail!(ErrorKind::FieldTooLarge(name, limit));
        }
        data.extend_from_slice(&chunk);
      }

      match filename {
        // a file input left empty still sends a part, with no filename
        Some(filename) => {
          if name == IMAGE_FIELD && form.image.is_none() && !filename.is_empty() {
            form.image = Some(Image {
              filename,
              data: data.freeze(),
            });
          }
        }
        None => {
          if !form.fields.contains_key(&name) {
            form.fields.insert(name, String::from_utf8(data.to_vec())?);
          }
        }
      }
    }

    Ok(form)
  }

  pub fn text(&self, name: &str) -> Option<&str> {
    self.fields.get(name).map(String::as_str)
  }

  pub fn required(&self, name: &str) -> Result<String> {
    match self.text(name) {
      Some(value) => Ok(value.to_string()),
      None => Err(ErrorKind::MissingField(name.to_string()).into()),
    }
  }
}

/// `{"lat": .., "lng": ..}`; an absent field or sub-field counts as 0.
pub fn parse_location(raw: Option<&str>) -> Result<Location> {
  let value: JsonValue = serde_json::from_str(raw.unwrap_or("{}"))?;
  let object = match value.as_object() {
    Some(object) => object,
    None => return Err(ErrorKind::InvalidLocation(format!("expected an object, got {}", value)).into()),
  };

  Ok(Location {
    lat: coordinate(object.get("lat"), "lat")?,
    lng: coordinate(object.get("lng"), "lng")?,
  })
}

fn coordinate(value: Option<&JsonValue>, name: &str) -> Result<f64> {
  let invalid = || ErrorKind::InvalidLocation(format!("{} is not a number: {}", name, value.unwrap_or(&JsonValue::Null)));

  match value {
    None => Ok(0.0),
    Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(|| invalid().into()),
    // numeric strings are accepted, `"4.65"` is as good as `4.65`
    Some(JsonValue::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid().into()),
    Some(_) => Err(invalid().into()),
  }
}
