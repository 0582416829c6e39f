use serde::{Deserialize, Serialize};

/// A spare part image listed by `/api/parts`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PartRecord {
  #[serde(default)]
  pub name: Option<String>,

  pub url: String
}
