use super::{
  block,
  form::{self, Form},
  Config, Store,
};
use crate::{
  error::{self, ErrorKind, Result},
  schema::{NewReport, Report},
  upload,
};
use actix_multipart::Multipart;
use actix_web::{delete, get, http::StatusCode, web, HttpResponse};
use chrono::Utc;
use error_chain::bail;
use serde_json::json;
use std::path::PathBuf;

const HEALTH: &str = "API Actix + PostgreSQL/PostGIS OK";

#[get("/")]
pub async fn sv_root() -> HttpResponse {
  HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(HEALTH)
}

/// POST /reportes
/// Every failure, storage included, is answered with 400.
pub async fn sv_create(payload: Multipart, store: Store, config: Config) -> HttpResponse {
  match create(payload, store, config).await {
    Ok(report) => HttpResponse::Created().json(json!({
      "mensaje": "Reporte creado",
      "reporte": report
    })),
    Err(e) => error::json(StatusCode::BAD_REQUEST, &e),
  }
}

async fn create(payload: Multipart, store: Store, config: Config) -> Result<Report> {
  let mut form = Form::read(payload, &config.server).await?;

  let title = form.required("title")?;
  let description = form.required("description")?;
  let category = form.required("category")?;
  let author_name = form.required("authorName")?;
  let contact_phone = form.text("contactPhone").unwrap_or_default().to_string();
  let location = form::parse_location(form.text("location"))?;

  // written before the insert, and left in place if the insert fails
  let image_url = match form.image.take() {
    Some(image) => {
      let dir = PathBuf::from(&config.server.upload_dir);
      let name = web::block(move || upload::save(&dir, &image.filename, &image.data)).await??;
      upload::public_url(&config.web.public_url, &name)
    }
    None => String::new(),
  };

  let report = NewReport {
    title,
    description,
    category,
    author_name,
    contact_phone,
    image_url,
    date: Utc::now().date_naive(),
    location,
  };
  block(store, move |store| store.insert(report)).await
}

/// GET /reportes
pub async fn sv_list(store: Store) -> HttpResponse {
  match block(store, |store| store.list()).await {
    Ok(reports) => HttpResponse::Ok().json(reports),
    Err(e) => error::json(StatusCode::INTERNAL_SERVER_ERROR, &e),
  }
}

#[delete("/{id}")]
pub async fn sv_delete(id: web::Path<i32>, store: Store) -> HttpResponse {
  let id = id.into_inner();
  let result = block(store, move |store| {
    if !store.delete(id)? {
      bail!(ErrorKind::NotFound);
    }
    Ok(())
  })
  .await;

  match result {
    Ok(()) => HttpResponse::Ok().json(json!({ "mensaje": "Reporte eliminado" })),
    Err(e) => match e.kind() {
      ErrorKind::NotFound => error::json(StatusCode::NOT_FOUND, &e),
      _ => error::json(StatusCode::INTERNAL_SERVER_ERROR, &e),
    },
  }
}
