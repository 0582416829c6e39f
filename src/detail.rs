use chrono::Utc;
use tracing::{info, warn};

use crate::{
  catalog::{decode_component, image_url, strip_extension, CatalogEntry, CatalogSource, InstrumentRecord, PartRecord},
  config::ImageBases,
  routes::Origin
};

/// Outcome of opening `/products/:id/:origin?`
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
  Found { entry: CatalogEntry, image: String },
  /// Only machines can end up here, they're the only ones looked up
  NotFound
}

/// Turns a detail route into something to show.
///
/// Machines are looked up by slug (the id minus its extension). Instruments and
/// parts are never checked against the catalog: the record is built from the
/// decoded path segment alone, so any id renders.
pub async fn resolve_detail(id: &str, origin: Origin, source: &dyn CatalogSource, images: &ImageBases) -> DetailView {
  let name = decode_component(id);

  let entry = match origin {
    Origin::Machine => {
      let slug = strip_extension(&name);

      match source.machine_detail(slug).await {
        Ok(Some(record)) => CatalogEntry::Machine(record),
        Ok(None) => {
          info!(%slug, "machine not in catalog");
          return DetailView::NotFound;
        },
        Err(e) => {
          warn!(%slug, error = %e, "machine lookup failed");
          return DetailView::NotFound;
        }
      }
    },
    Origin::Instrument => CatalogEntry::Instrument(InstrumentRecord {
      url: format!("{}/{}", images.instrument, id),
      name: Some(name),
      size: None,
      last_modified: Some(Utc::now().to_rfc3339())
    }),
    Origin::Part => CatalogEntry::Part(PartRecord {
      url: format!("{}/{}", images.part, id),
      name: Some(name)
    })
  };

  let image = image_url(&entry, images);
  DetailView::Found { entry, image }
}
