use actix_web::{http::StatusCode, HttpResponse};
use error_chain::error_chain;
use serde_json::json;

error_chain! {
  foreign_links {
    R2D2Error(r2d2::Error);
    PostgresError(postgres::Error);
    SerdeJsonError(serde_json::error::Error);
    IoError(std::io::Error);
    TomlError(toml::de::Error);
    FromUtf8Error(std::string::FromUtf8Error);
  }

  errors {
    MissingField(name: String) {
      description("missing required field")
      display("missing required field: {}", name)
    }
    InvalidLocation(reason: String) {
      description("invalid location")
      display("invalid location: {}", reason)
    }
    InvalidFilename(name: String) {
      description("invalid filename")
      display("invalid filename: {:?}", name)
    }
    FieldTooLarge(name: String, limit: usize) {
      description("form field too large")
      display("field {} exceeds {} bytes", name, limit)
    }
    NotFound {
      description("report not found")
      display("Reporte no encontrado")
    }
  }
}

impl From<actix_web::error::BlockingError> for Error {
  fn from(e: actix_web::error::BlockingError) -> Self {
    e.to_string().into()
  }
}

// MultipartError may carry a non-Send actix_web::Error, so only its text is kept
impl From<actix_multipart::MultipartError> for Error {
  fn from(e: actix_multipart::MultipartError) -> Self {
    e.to_string().into()
  }
}

pub fn display(error: &Error) -> String {
  let mut msg = "Error:\n".to_string();
  error
    .iter()
    .enumerate()
    .for_each(|(index, error)| msg.push_str(&format!("└> {} - {}\n", index, error)));

  if let Some(backtrace) = error.backtrace() {
    msg.push_str(&format!("\n{:?}", backtrace));
  }
  msg
}

/// `{"error": "..."}` envelope carrying the error's own description.
pub fn json(status: StatusCode, error: &Error) -> HttpResponse {
  if status.is_server_error() {
    log::error!("{}", display(error));
  } else {
    log::warn!("{} {}", status, error);
  }
  HttpResponse::build(status).json(json!({ "error": error.to_string() }))
}
