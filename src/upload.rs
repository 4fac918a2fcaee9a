use crate::error::{ErrorKind, Result};
use error_chain::bail;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Mount point of the upload directory.
pub const ROUTE: &str = "/uploads";

/// Reduces a client supplied filename to `[A-Za-z0-9_.-]`.
/// Accents are decomposed first and their marks dropped, so `café.png` keeps its `e`.
/// Path separators become word breaks, so `../../etc/passwd` ends up as `etc_passwd`.
pub fn sanitize_filename(filename: &str) -> String {
  lazy_static! {
    static ref UNSAFE: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
  }

  let filename: String = filename.nfkd().filter(char::is_ascii).collect();
  let filename = filename.replace(['/', '\\'], " ");
  let filename = filename.split_whitespace().collect::<Vec<_>>().join("_");
  UNSAFE
    .replace_all(&filename, "")
    .trim_matches(|c: char| c == '.' || c == '_')
    .to_string()
}

pub fn public_url(base: &str, filename: &str) -> String {
  format!("{}{}/{}", base, ROUTE, filename)
}

/// Writes `data` as `<dir>/<sanitized filename>`, replacing any file already there.
/// Returns the sanitized name.
pub fn save(dir: &Path, filename: &str, data: &[u8]) -> Result<String> {
  let name = sanitize_filename(filename);
  if name.is_empty() {
    bail!(ErrorKind::InvalidFilename(filename.to_string()));
  }

  let path = dir.join(&name);
  std::fs::write(&path, data)?;
  log::debug!("stored upload {} ({} bytes)", path.display(), data.len());
  Ok(name)
}
