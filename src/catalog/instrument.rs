use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// An instrument image listed by `/api/instruments`.
/// Only the url is guaranteed, everything else is best effort.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentRecord {
  #[serde(default)]
  pub name: Option<String>,

  pub url: String,

  /// Size of the image in bytes
  #[serde(default)]
  pub size: Option<u64>,

  #[serde(default)]
  pub last_modified: Option<String>
}

impl InstrumentRecord {
  /// `12.50 KB`, nothing for a missing or zero size
  pub fn size_kb(&self) -> Option<String> {
    match self.size {
      Some(bytes) if bytes > 0 => Some(format!("{:.2} KB", bytes as f64 / 1024.0)),
      _ => None
    }
  }

  /// Month/day/year when the timestamp parses, otherwise the raw value
  pub fn last_modified_date(&self) -> Option<String> {
    self.last_modified.as_deref().map(short_date)
  }
}

pub fn short_date(timestamp: &str) -> String {
  match DateTime::parse_from_rfc3339(timestamp) {
    Ok(date) => date.format("%-m/%-d/%Y").to_string(),
    Err(_) => timestamp.to_string()
  }
}
