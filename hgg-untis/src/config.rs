use std::time::Duration;

use reqwest::Url;

pub const DEFAULT_BASE_URL: &str =
  "http://www.hgg-markgroeningen.de/pages/hgg/verwaltung/vertretungsplan/Schueler/";
pub const DEFAULT_STATIC_PATH: &str = "/static";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3);

pub const STYLESHEET: &str = "untisinfo.css";

#[derive(Clone, Debug)]
pub struct Config {
  pub base_url: Url,
  pub static_path: String,
  pub cache_ttl: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
      static_path: DEFAULT_STATIC_PATH.to_string(),
      cache_ttl: DEFAULT_CACHE_TTL,
    }
  }
}

impl Config {
  pub fn navbar_url(&self) -> anyhow::Result<Url> {
    Ok(self.base_url.join("frames/navbar.htm")?)
  }

  pub fn plan_url(&self, week: u8, page_key: &str) -> anyhow::Result<Url> {
    Ok(self.base_url.join(&format!("{week}/c/{page_key}.htm"))?)
  }

  pub fn asset_url(&self, name: &str) -> String {
    format!("{}/{}", self.static_path.trim_end_matches('/'), name)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn builds_upstream_urls() -> anyhow::Result<()> {
    let config = Config::default();

    assert_eq!(
      config.navbar_url()?.as_str(),
      "http://www.hgg-markgroeningen.de/pages/hgg/verwaltung/vertretungsplan/Schueler/frames/navbar.htm"
    );
    assert_eq!(
      config.plan_url(7, "c00002")?.as_str(),
      "http://www.hgg-markgroeningen.de/pages/hgg/verwaltung/vertretungsplan/Schueler/7/c/c00002.htm"
    );

    Ok(())
  }

  #[test]
  fn joins_asset_path() {
    let mut config = Config::default();
    assert_eq!(config.asset_url(STYLESHEET), "/static/untisinfo.css");

    config.static_path = "/assets/".to_string();
    assert_eq!(config.asset_url(STYLESHEET), "/assets/untisinfo.css");
  }
}
