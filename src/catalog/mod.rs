use std::{fmt::{Display, Formatter}, str::FromStr};

mod machine;
mod instrument;
mod part;
mod listing;
mod source;
mod filter;
mod links;
mod card;

pub use machine::*;
pub use instrument::*;
pub use part::*;
pub use listing::*;
pub use source::*;
pub use filter::*;
pub use links::*;
pub use card::*;

/// The three catalog tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
  Machines,
  Instruments,
  Parts
}

impl Category {
  pub const ALL: [Category; 3] = [Category::Machines, Category::Instruments, Category::Parts];

  /// Tab title
  pub fn label(&self) -> &'static str {
    match self {
      Category::Machines => "Machines",
      Category::Instruments => "Instruments",
      Category::Parts => "Parts"
    }
  }

  /// Lowercase plural used in prompts, e.g. "Search parts..."
  pub fn noun(&self) -> &'static str {
    match self {
      Category::Machines => "machines",
      Category::Instruments => "instruments",
      Category::Parts => "parts"
    }
  }

  pub fn index(&self) -> usize {
    match self {
      Category::Machines => 0,
      Category::Instruments => 1,
      Category::Parts => 2
    }
  }

  pub fn next(&self) -> Category {
    Category::ALL[(self.index() + 1) % Category::ALL.len()]
  }

  pub fn previous(&self) -> Category {
    Category::ALL[(self.index() + Category::ALL.len() - 1) % Category::ALL.len()]
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.noun())
  }
}

impl FromStr for Category {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "machines" | "machine" => Ok(Category::Machines),
      "instruments" | "instrument" => Ok(Category::Instruments),
      "parts" | "part" => Ok(Category::Parts),
      other => Err(format!("unknown category '{}', expected machines, instruments or parts", other))
    }
  }
}

/// Any single thing in the catalog. Detail screens and inquiries carry one of these around.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
  Machine(MachineRecord),
  Instrument(InstrumentRecord),
  Part(PartRecord)
}

impl CatalogEntry {
  pub fn category(&self) -> Category {
    match self {
      CatalogEntry::Machine(_) => Category::Machines,
      CatalogEntry::Instrument(_) => Category::Instruments,
      CatalogEntry::Part(_) => Category::Parts
    }
  }

  /// What the entry is called on cards. Nameless instruments and parts fall back
  /// to their url without the file extension.
  pub fn display_name(&self) -> String {
    match self {
      CatalogEntry::Machine(m) => m.name.clone(),
      CatalogEntry::Instrument(i) => nameless_fallback(i.name.as_deref(), &i.url),
      CatalogEntry::Part(p) => nameless_fallback(p.name.as_deref(), &p.url)
    }
  }
}

impl From<MachineRecord> for CatalogEntry {
  fn from(record: MachineRecord) -> Self { CatalogEntry::Machine(record) }
}

impl From<InstrumentRecord> for CatalogEntry {
  fn from(record: InstrumentRecord) -> Self { CatalogEntry::Instrument(record) }
}

impl From<PartRecord> for CatalogEntry {
  fn from(record: PartRecord) -> Self { CatalogEntry::Part(record) }
}

fn nameless_fallback(name: Option<&str>, url: &str) -> String {
  match name {
    Some(name) if !name.is_empty() => name.to_string(),
    _ => strip_extension(url).to_string()
  }
}

/// Drops a trailing `.ext` from the last path segment, if there is one
pub fn strip_extension(s: &str) -> &str {
  match s.rfind('.') {
    Some(i) if i + 1 < s.len() && !s[i + 1..].contains('/') => &s[..i],
    _ => s
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_only_the_last_extension() {
    assert_eq!(strip_extension("evita_v300.jpg"), "evita_v300");
    assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
    assert_eq!(strip_extension("no_extension"), "no_extension");
    assert_eq!(strip_extension("trailing."), "trailing.");
    assert_eq!(strip_extension("https://cdn.example.com/v1.2/scalpel"), "https://cdn.example.com/v1.2/scalpel");
  }

  #[test]
  fn tabs_cycle_both_ways() {
    assert_eq!(Category::Machines.next(), Category::Instruments);
    assert_eq!(Category::Parts.next(), Category::Machines);
    assert_eq!(Category::Machines.previous(), Category::Parts);
  }

  #[test]
  fn categories_parse_from_cli_words() {
    assert_eq!("Parts".parse::<Category>(), Ok(Category::Parts));
    assert_eq!("instrument".parse::<Category>(), Ok(Category::Instruments));
    assert!("gadgets".parse::<Category>().is_err());
  }

  #[test]
  fn nameless_entries_use_their_url() {
    let part = CatalogEntry::Part(PartRecord { name: None, url: "valve_seal.png".into() });
    assert_eq!(part.display_name(), "valve_seal");

    let named = CatalogEntry::Part(PartRecord { name: Some("Valve Seal".into()), url: "valve_seal.png".into() });
    assert_eq!(named.display_name(), "Valve Seal");
  }
}
