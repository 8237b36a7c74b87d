use reqwest::Url;
use time::PrimitiveDateTime;
use tracing::info;

pub use crate::cache::CachedTransport;
pub use crate::class::{page_key, parse_class_header, resolve_class, ClassInfo};
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::Config;
pub use crate::directory::{fetch_directory, is_class_name, parse_class_list, ClassDirectory};
pub use crate::error::ParseError;
pub use crate::plan::{get_class_plans, get_plans, PlanPage};
pub use crate::rewrite::rewrite;
pub use crate::transport::{HttpResponse, HttpTransport, Transport};
pub use crate::week::{day_offset_phrase, days_until_start, start_of_week, week_window};

mod cache;
mod class;
mod clock;
pub mod config;
mod directory;
mod error;
mod plan;
pub mod rewrite;
mod transport;
pub mod week;

pub struct FetchContext<T = CachedTransport<HttpTransport>, C = SystemClock> {
  transport: T,
  clock: C,
  config: Config,
}

impl FetchContext {
  pub fn new(config: Config, clock: SystemClock) -> Self {
    Self {
      transport: CachedTransport::new(HttpTransport::new(), config.cache_ttl),
      clock,
      config,
    }
  }
}

impl<T: Transport, C: Clock> FetchContext<T, C> {
  pub fn with(transport: T, clock: C, config: Config) -> Self {
    Self {
      transport,
      clock,
      config,
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  pub fn now(&self) -> PrimitiveDateTime {
    self.clock.now()
  }

  /// Body of `url` if it answered with `200 OK`.
  async fn fetch(&self, url: &Url) -> Option<String> {
    match self.transport.get(url).await {
      Err(err) => {
        info!("Unable to fetch {}: {}", url, err);
        None
      }
      Ok(response) if !response.is_ok() => {
        info!("Unable to fetch {}: status {}", url, response.status);
        None
      }
      Ok(response) => Some(response.body),
    }
  }
}
