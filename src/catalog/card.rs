use crate::config::ImageBases;
use super::{detail_path, image_url, CatalogEntry};

/// Everything a listing shows about one entry, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
  pub title: String,
  pub badge: String,
  pub lines: Vec<String>,
  pub image: String,
  pub link: String
}

impl Card {
  pub fn new(entry: &CatalogEntry, images: &ImageBases) -> Self {
    let (badge, lines) = match entry {
      CatalogEntry::Machine(m) => ("Machine".to_string(), if m.metadata.description.is_empty() {
        vec![]
      } else {
        vec![m.metadata.description.clone()]
      }),
      CatalogEntry::Instrument(i) => {
        let mut lines = vec![];
        if let Some(date) = i.last_modified_date() { lines.push(format!("Last modified: {}", date)); }
        if let Some(size) = i.size_kb() { lines.push(format!("Size: {}", size)); }
        ("Instrument".to_string(), lines)
      },
      CatalogEntry::Part(_) => ("Parts".to_string(), vec![])
    };

    Card {
      title: entry.display_name(),
      badge,
      lines,
      image: image_url(entry, images),
      link: detail_path(entry)
    }
  }

  /// One-paragraph plain text rendition, for non-interactive output
  pub fn plain(&self) -> String {
    let mut out = format!("{} [{}]\n", self.title, self.badge);
    for line in &self.lines {
      out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!("  image: {}\n", self.image));
    out.push_str(&format!("  details: {}\n", self.link));
    out
  }
}
