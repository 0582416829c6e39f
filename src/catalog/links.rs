use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::ImageBases;
use super::CatalogEntry;

/// Same escaping as a browser's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// Shown in place of any product photo that can't be fetched
pub const FALLBACK_IMAGE: &str = "/fallback-image.png";

pub fn encode_component(s: &str) -> String {
  utf8_percent_encode(s, COMPONENT).to_string()
}

/// Invalid escapes and non-utf8 bytes are kept rather than rejected
pub fn decode_component(s: &str) -> String {
  percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// `Philips  IntelliVue MX450` => `philips_intellivue_mx450`
pub fn machine_file_stem(name: &str) -> String {
  name
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<&str>>()
    .join("_")
}

/// Where the photo of an entry should be
pub fn image_url(entry: &CatalogEntry, bases: &ImageBases) -> String {
  match entry {
    CatalogEntry::Machine(m) => format!("{}/{}{}", bases.machine, machine_key(m), m.extension),
    CatalogEntry::Instrument(i) => match &i.name {
      Some(name) => format!("{}/{}", bases.instrument, encode_component(name)),
      None => i.url.clone()
    },
    CatalogEntry::Part(p) => match &p.name {
      Some(name) => format!("{}/{}", bases.part, encode_component(name)),
      None => p.url.clone()
    }
  }
}

/// The route a card links to
pub fn detail_path(entry: &CatalogEntry) -> String {
  match entry {
    CatalogEntry::Machine(m) => format!("/products/{}{}", machine_key(m), m.extension),
    CatalogEntry::Instrument(i) => format!("/products/{}/instrument", encode_component(i.name.as_deref().unwrap_or("unnamed"))),
    CatalogEntry::Part(p) => format!("/products/{}/part", encode_component(p.name.as_deref().unwrap_or("unnamed")))
  }
}

// the slug is the real key; older records without one were keyed by their formatted name
fn machine_key(m: &super::MachineRecord) -> String {
  if m.slug.is_empty() { machine_file_stem(&m.name) } else { m.slug.clone() }
}
