use super::{CatalogEntry, Listing};

/// Choices offered by the category selector. "All" and "" both mean no filter.
pub const CATEGORY_CHOICES: [&str; 6] = ["All", "Monitors", "Surgical", "Imaging", "Respiratory", "Accessories"];

/// The entries of `listing` that match the search term and category filter.
///
/// Search is a case-insensitive substring match: machines match on name or
/// description, instruments and parts on name or url. Only machines take the
/// category filter into account. No ranking, the listing order is kept.
pub fn filter_listing<'a>(listing: &'a Listing, search: &str, category: &str) -> Vec<&'a CatalogEntry> {
  let needle = search.to_lowercase();

  listing
    .entries()
    .iter()
    .filter(|entry| matches_entry(entry, &needle, category))
    .collect()
}

/// `needle` must already be lowercase
pub fn matches_entry(entry: &CatalogEntry, needle: &str, category: &str) -> bool {
  match entry {
    CatalogEntry::Machine(m) => {
      let found = contains(&m.name, needle) || contains(&m.metadata.description, needle);
      found && category_matches(m.category_value(), category)
    },
    CatalogEntry::Instrument(i) => name_or_url(i.name.as_deref(), &i.url, needle),
    CatalogEntry::Part(p) => name_or_url(p.name.as_deref(), &p.url, needle)
  }
}

fn contains(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(needle)
}

fn name_or_url(name: Option<&str>, url: &str, needle: &str) -> bool {
  name.map_or(false, |n| contains(n, needle)) || contains(url, needle)
}

fn category_matches(value: Option<&str>, category: &str) -> bool {
  if category.is_empty() || category == "All" {
    return true;
  }

  value.map_or(false, |v| v.to_lowercase() == category.to_lowercase())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{InstrumentRecord, MachineMetadata, MachineRecord, PartRecord, SpecValue};
  use pretty_assertions::assert_eq;

  fn machine(name: &str, description: &str) -> MachineRecord {
    MachineRecord {
      name: name.into(),
      url: String::new(),
      metadata: MachineMetadata { description: description.into(), ..Default::default() },
      created_at: None,
      updated_at: None,
      slug: name.to_lowercase(),
      extension: ".jpg".into()
    }
  }

  fn instrument(name: Option<&str>, url: &str) -> InstrumentRecord {
    InstrumentRecord { name: name.map(String::from), url: url.into(), size: None, last_modified: None }
  }

  fn names(entries: &[&CatalogEntry]) -> Vec<String> {
    entries.iter().map(|e| e.display_name()).collect()
  }

  fn machines() -> Listing {
    Listing::machines(vec![
      machine("Evita V300", "Respiratory"),
      machine("IntelliVue MX450", "Monitors"),
      machine("C-Arm OEC 9900", "Imaging"),
      machine("Unlabelled", "")
    ])
  }

  #[test]
  fn empty_search_returns_everything() {
    let listing = machines();
    assert_eq!(filter_listing(&listing, "", "").len(), listing.len());
    assert_eq!(filter_listing(&listing, "", "All").len(), listing.len());
  }

  #[test]
  fn machines_match_name_or_description_case_insensitively() {
    let listing = machines();
    assert_eq!(names(&filter_listing(&listing, "mx4", "")), vec!["IntelliVue MX450"]);
    assert_eq!(names(&filter_listing(&listing, "IMAGING", "")), vec!["C-Arm OEC 9900"]);
    assert!(filter_listing(&listing, "defibrillator", "").is_empty());
  }

  #[test]
  fn category_filter_compares_against_description() {
    let listing = machines();
    assert_eq!(names(&filter_listing(&listing, "", "monitors")), vec!["IntelliVue MX450"]);
    assert_eq!(names(&filter_listing(&listing, "evita", "Respiratory")), vec!["Evita V300"]);
    assert!(filter_listing(&listing, "evita", "Surgical").is_empty());
  }

  #[test]
  fn category_specification_is_used_without_description() {
    let mut tagged = machine("Stryker 1488", "");
    tagged.metadata.specifications.insert("category".into(), SpecValue::Text("Surgical".into()));
    let listing = Listing::machines(vec![tagged, machine("Unlabelled", "")]);

    assert_eq!(names(&filter_listing(&listing, "", "Surgical")), vec!["Stryker 1488"]);
  }

  #[test]
  fn instruments_match_name_or_url_and_ignore_category() {
    let listing = Listing::instruments(vec![
      instrument(Some("Kelly Forceps"), "https://cdn.example.com/instruments/k1.png"),
      instrument(None, "https://cdn.example.com/instruments/mayo_scissors.png"),
      instrument(Some("Needle Holder"), "https://cdn.example.com/instruments/n1.png")
    ]);

    assert_eq!(names(&filter_listing(&listing, "forceps", "Monitors")), vec!["Kelly Forceps"]);
    assert_eq!(filter_listing(&listing, "SCISSORS", "").len(), 1);
    assert_eq!(filter_listing(&listing, "cdn.example", "").len(), 3);
  }

  #[test]
  fn every_result_contains_the_term() {
    let listing = Listing::parts(vec![
      PartRecord { name: Some("Flow Sensor".into()), url: "fs.png".into() },
      PartRecord { name: Some("O2 Cell".into()), url: "o2.png".into() },
      PartRecord { name: None, url: "sensor_cable.png".into() }
    ]);

    for term in ["sensor", "o", "PNG", "cell", "zzz"] {
      let needle = term.to_lowercase();
      for entry in filter_listing(&listing, term, "") {
        let CatalogEntry::Part(p) = entry else { panic!("parts listing yielded {:?}", entry) };
        let hit = p.name.as_deref().map_or(false, |n| n.to_lowercase().contains(&needle))
          || p.url.to_lowercase().contains(&needle);
        assert!(hit, "{:?} does not contain {}", p, term);
      }
    }
  }
}
