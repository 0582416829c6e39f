use serde::Deserialize;

use super::{CatalogEntry, Category, InstrumentRecord, MachineRecord, PartRecord};

/// Everything loaded for one tab. Entries always belong to `category`.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
  category: Category,
  entries: Vec<CatalogEntry>
}

impl Listing {
  pub fn empty(category: Category) -> Self {
    Listing { category, entries: vec![] }
  }

  pub fn machines(records: Vec<MachineRecord>) -> Self {
    Listing { category: Category::Machines, entries: records.into_iter().map(CatalogEntry::from).collect() }
  }

  pub fn instruments(records: Vec<InstrumentRecord>) -> Self {
    Listing { category: Category::Instruments, entries: records.into_iter().map(CatalogEntry::from).collect() }
  }

  pub fn parts(records: Vec<PartRecord>) -> Self {
    Listing { category: Category::Parts, entries: records.into_iter().map(CatalogEntry::from).collect() }
  }

  pub fn category(&self) -> Category { self.category }

  pub fn entries(&self) -> &[CatalogEntry] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// List endpoints answer either with a bare array or with an object holding one
/// named array (`{ "machines": [...] }`). A null or missing array reads as empty.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
  Bare(Vec<T>),
  Named {
    #[serde(alias = "machines", alias = "instruments", alias = "parts", alias = "data")]
    items: Option<Vec<T>>
  }
}

impl<T> ListBody<T> {
  pub(crate) fn into_items(self) -> Vec<T> {
    match self {
      ListBody::Bare(items) => items,
      ListBody::Named { items } => items.unwrap_or_default()
    }
  }
}

/// `{ "data": {...} }` from the single-item endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct SingleBody<T> {
  pub(crate) data: Option<T>
}
