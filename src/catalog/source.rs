use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{
  listing::{ListBody, SingleBody},
  encode_component, Category, InstrumentRecord, Listing, MachineRecord, PartRecord
};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error
  },

  #[error("{url} answered {status}")]
  Status { url: String, status: StatusCode },

  #[error("unreadable body from {url}: {source}")]
  Body {
    url: String,
    #[source]
    source: serde_json::Error
  }
}

/// The remote catalog. Every method is one request, nothing is retried or cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
  /// Everything shown under one tab
  async fn listing(&self, category: Category) -> Result<Listing, CatalogError>;

  /// Plain machine index, without descriptions
  async fn machine_index(&self) -> Result<Vec<MachineRecord>, CatalogError>;

  /// One machine by slug. `None` when the catalog doesn't know it.
  async fn machine_detail(&self, slug: &str) -> Result<Option<MachineRecord>, CatalogError>;

  /// Whether an image url answers at all
  async fn image_available(&self, url: &str) -> bool;
}

/// `CatalogSource` over the catalog's JSON API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
  client: Client,
  api_url: String
}

impl HttpCatalog {
  pub fn new(api_url: impl Into<String>) -> Self {
    HttpCatalog { client: Client::new(), api_url: api_url.into() }
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
    let url = format!("{}{}", self.api_url, path);
    debug!(%url, "GET");

    let response = self.client
      .get(&url)
      .header(CONTENT_TYPE, "application/json")
      .send()
      .await;

    let response = match response {
      Ok(r) => r,
      Err(source) => return Err(CatalogError::Transport { url, source })
    };

    let status = response.status();
    if !status.is_success() {
      return Err(CatalogError::Status { url, status });
    }

    let bytes = match response.bytes().await {
      Ok(b) => b,
      Err(source) => return Err(CatalogError::Transport { url, source })
    };

    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Body { url, source })
  }

  async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, CatalogError> {
    let body: ListBody<T> = self.get_json(path).await?;
    Ok(body.into_items())
  }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
  async fn listing(&self, category: Category) -> Result<Listing, CatalogError> {
    let listing = match category {
      Category::Machines => Listing::machines(self.get_list::<MachineRecord>("/api/machines/descriptions").await?),
      Category::Instruments => Listing::instruments(self.get_list::<InstrumentRecord>("/api/instruments").await?),
      Category::Parts => Listing::parts(self.get_list::<PartRecord>("/api/parts").await?)
    };

    info!(%category, entries = listing.len(), "loaded listing");
    Ok(listing)
  }

  async fn machine_index(&self) -> Result<Vec<MachineRecord>, CatalogError> {
    self.get_list("/api/machines").await
  }

  async fn machine_detail(&self, slug: &str) -> Result<Option<MachineRecord>, CatalogError> {
    let path = format!("/api/machines/singledesc/{}", encode_component(slug));

    match self.get_json::<SingleBody<MachineRecord>>(&path).await {
      Ok(body) => Ok(body.data),
      Err(CatalogError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
      Err(e) => Err(e)
    }
  }

  async fn image_available(&self, url: &str) -> bool {
    match self.client.head(url).send().await {
      Ok(response) => response.status().is_success(),
      Err(e) => {
        debug!(%url, error = %e, "image probe failed");
        false
      }
    }
  }
}
