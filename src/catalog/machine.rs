use std::fmt::{Display, Error, Formatter, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A machine as served by `/api/machines/descriptions` and `/api/machines/singledesc/:slug`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRecord {
  /// Display name, also the key the listing is rendered by
  pub name: String,

  #[serde(default)]
  pub url: String,

  #[serde(default)]
  pub metadata: MachineMetadata,

  #[serde(default)]
  pub created_at: Option<String>,

  #[serde(default)]
  pub updated_at: Option<String>,

  /// API lookup key and the stem of the image file
  #[serde(default)]
  pub slug: String,

  /// Image file extension including the dot, e.g. `.jpg`
  #[serde(default)]
  pub extension: String
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MachineMetadata {
  #[serde(default)]
  pub description: String,

  #[serde(default)]
  pub features: Vec<String>,

  /// Free-form, arbitrarily nested. Order is whatever the API sent.
  #[serde(default)]
  pub specifications: IndexMap<String, SpecValue>
}

/// One node of a specification tree
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SpecValue {
  Text(String),
  Number(serde_json::Number),
  Flag(bool),
  List(Vec<SpecValue>),
  Map(IndexMap<String, SpecValue>),
  Null
}

impl SpecValue {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      SpecValue::Text(s) => Some(s),
      _ => None
    }
  }
}

impl Display for SpecValue {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      SpecValue::Text(s) => write!(f, "{}", s),
      SpecValue::Number(n) => write!(f, "{}", n),
      SpecValue::Flag(b) => write!(f, "{}", if *b { "Yes" } else { "No" }),
      SpecValue::List(items) => {
        let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(", "))
      },
      // inline maps only show up inside lists, print them whole
      SpecValue::Map(map) => write!(f, "{}", serde_json::to_string(map).map_err(|_| Error)?),
      SpecValue::Null => Ok(())
    }
  }
}

/// Specification keys the detail screen pulls out above the full tree
pub const HIGHLIGHTED_SPECS: [&str; 4] = ["Dimensions", "Weight", "Condition", "Availability"];

impl MachineRecord {
  /// The value category filters compare against: the description when there is one,
  /// otherwise a textual `category` specification.
  pub fn category_value(&self) -> Option<&str> {
    if !self.metadata.description.is_empty() {
      return Some(&self.metadata.description);
    }

    self.metadata.specifications.get("category").and_then(SpecValue::as_text)
  }

  /// Highlighted specs, only those present as plain text
  pub fn highlights(&self) -> Vec<(&'static str, &str)> {
    HIGHLIGHTED_SPECS
      .iter()
      .filter_map(|key| {
        self.metadata.specifications
          .get(*key)
          .and_then(SpecValue::as_text)
          .map(|value| (*key, value))
      })
      .collect()
  }

  /// Specifications as 2-space indented JSON, the shape the inquiry template expects
  pub fn specifications_json(&self) -> String {
    serde_json::to_string_pretty(&self.metadata.specifications).unwrap_or_default()
  }
}

/// `operating_voltage` => `Operating Voltage`
pub fn humanize_key(key: &str) -> String {
  key
    .split('_')
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
      }
    })
    .collect::<Vec<String>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  const VENTILATOR: &str = r#"{
    "name": "Drager Evita V300",
    "url": "https://cdn.example.com/machines/evita_v300.jpg",
    "metadata": {
      "description": "Respiratory",
      "features": ["Invasive ventilation", "Neonatal option"],
      "specifications": {
        "Weight": "38 kg",
        "Dimensions": "48 x 52 x 135 cm",
        "modes": ["SIMV", "CPAP"],
        "power": { "voltage": 230, "battery": true },
        "notes": null
      }
    },
    "createdAt": "2024-05-01T10:00:00.000Z",
    "updatedAt": "2024-05-02T10:00:00.000Z",
    "slug": "evita_v300",
    "extension": ".jpg"
  }"#;

  #[test]
  fn parses_nested_specifications_in_order() {
    let machine: MachineRecord = serde_json::from_str(VENTILATOR).unwrap();

    let keys: Vec<&str> = machine.metadata.specifications.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Weight", "Dimensions", "modes", "power", "notes"]);
    assert_eq!(machine.metadata.specifications["notes"], SpecValue::Null);
    assert!(matches!(machine.metadata.specifications["power"], SpecValue::Map(_)));
    assert_eq!(machine.metadata.specifications["modes"].to_string(), "SIMV, CPAP");
    assert_eq!(machine.created_at.as_deref(), Some("2024-05-01T10:00:00.000Z"));
  }

  #[test]
  fn highlights_keep_display_order_and_skip_missing() {
    let machine: MachineRecord = serde_json::from_str(VENTILATOR).unwrap();
    assert_eq!(machine.highlights(), vec![("Dimensions", "48 x 52 x 135 cm"), ("Weight", "38 kg")]);
  }

  #[test]
  fn category_value_falls_back_to_specification() {
    let mut machine: MachineRecord = serde_json::from_str(VENTILATOR).unwrap();
    assert_eq!(machine.category_value(), Some("Respiratory"));

    machine.metadata.description.clear();
    assert_eq!(machine.category_value(), None);

    machine.metadata.specifications.insert("category".into(), SpecValue::Text("Imaging".into()));
    assert_eq!(machine.category_value(), Some("Imaging"));
  }

  #[test]
  fn bare_index_entries_parse_without_metadata() {
    let machine: MachineRecord = serde_json::from_str(r#"{ "name": "Philips MX450" }"#).unwrap();
    assert_eq!(machine.metadata, MachineMetadata::default());
    assert!(machine.slug.is_empty());
  }

  #[test]
  fn specifications_serialize_like_the_storefront_did() {
    let machine: MachineRecord = serde_json::from_str(
      r#"{ "name": "x", "metadata": { "specifications": { "Weight": "5 kg", "ports": 4 } } }"#
    ).unwrap();

    assert_eq!(machine.specifications_json(), "{\n  \"Weight\": \"5 kg\",\n  \"ports\": 4\n}");
  }

  #[test]
  fn lists_of_objects_print_as_json() {
    let value: SpecValue = serde_json::from_str(r#"[{ "port": "USB", "count": 2 }, "HDMI"]"#).unwrap();
    assert_eq!(value.to_string(), r#"{"port":"USB","count":2}, HDMI"#);
  }

  #[test]
  fn keys_are_humanized() {
    assert_eq!(humanize_key("operating_voltage"), "Operating Voltage");
    assert_eq!(humanize_key("Weight"), "Weight");
    assert_eq!(humanize_key("a__b"), "A  B");
  }
}
