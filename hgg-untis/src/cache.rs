use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;
use tracing::debug;

use crate::transport::{HttpResponse, Transport};

/// Short lived response cache in front of another transport.
pub struct CachedTransport<T> {
  inner: T,
  ttl: Duration,
  slots: Mutex<HashMap<Url, Arc<Slot>>>,
}

struct Slot {
  created_at: Instant,
  response: OnceCell<HttpResponse>,
}

impl<T> CachedTransport<T> {
  pub fn new(inner: T, ttl: Duration) -> Self {
    Self {
      inner,
      ttl,
      slots: Mutex::new(HashMap::new()),
    }
  }

  pub fn inner(&self) -> &T {
    &self.inner
  }

  async fn slot(&self, url: &Url) -> Arc<Slot> {
    let now = Instant::now();
    let mut slots = self.slots.lock().await;
    slots.retain(|_, slot| now.duration_since(slot.created_at) < self.ttl);

    Arc::clone(slots.entry(url.clone()).or_insert_with(|| {
      Arc::new(Slot {
        created_at: now,
        response: OnceCell::new(),
      })
    }))
  }

  async fn evict(&self, url: &Url, slot: &Arc<Slot>) {
    let mut slots = self.slots.lock().await;
    if slots.get(url).is_some_and(|current| Arc::ptr_eq(current, slot)) {
      slots.remove(url);
    }
  }
}

impl<T: Transport + Sync> Transport for CachedTransport<T> {
  async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse> {
    let slot = self.slot(url).await;

    if let Some(response) = slot.response.get() {
      debug!("Serving {} from cache", url);
      return Ok(response.clone());
    }

    let response = slot
      .response
      .get_or_try_init(|| self.inner.get(url))
      .await?
      .clone();

    // only successful responses may be reused
    if !response.is_ok() {
      self.evict(url, &slot).await;
    }

    Ok(response)
  }
}
