use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::clock::Clock;
use crate::directory::fetch_directory;
use crate::error::ParseError;
use crate::transport::Transport;
use crate::FetchContext;

/// `5A&nbsp;</font> <font face="Arial">ABC` once all whitespace is gone.
static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"([0-9][0-9]?[A-F]|[0-9]{4})&nbsp;</font><fontface="Arial">([A-Z]{3}|[0-9]{4})"#)
    .unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
  /// Class name as printed on the plan, may be formatted differently than the requested one.
  pub class_name: String,
  pub teacher_code: String,
  pub page_key: String,
}

/// Name of the per class page for the class at the 1-based `position`: `c00001`, `c00002`, ...
pub fn page_key(position: usize) -> String {
  format!("c{position:05}")
}

pub fn parse_class_header(html: &str) -> Result<(String, String), ParseError> {
  let compact = html
    .chars()
    .filter(|c| !c.is_whitespace())
    .collect::<String>();

  let captures = HEADER_REGEX
    .captures(&compact)
    .ok_or(ParseError::MissingClassHeader)?;

  Ok((captures[1].to_string(), captures[2].to_string()))
}

/// Looks `name` up in the directory and confirms it against the plan of the current week.
///
/// Returns `Ok(None)` if the directory or the plan can not be fetched, or if `name` is not one
/// of the published classes.
pub async fn resolve_class<T: Transport, C: Clock>(
  ctx: &FetchContext<T, C>,
  name: &str,
) -> anyhow::Result<Option<ClassInfo>> {
  let directory = match fetch_directory(ctx).await? {
    None => return Ok(None),
    Some(directory) => directory,
  };

  let page_key = match directory.page_key(name) {
    None => {
      info!("Unknown class {:?}", name);
      return Ok(None);
    }
    Some(page_key) => page_key,
  };

  let week = ctx.now().iso_week();
  let body = match ctx.fetch(&ctx.config().plan_url(week, &page_key)?).await {
    None => return Ok(None),
    Some(body) => body,
  };

  let (class_name, teacher_code) = parse_class_header(&body)?;
  info!(
    "Resolved class {} to {} with teacher {}",
    class_name, page_key, teacher_code
  );

  Ok(Some(ClassInfo {
    class_name,
    teacher_code,
    page_key,
  }))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn pads_page_keys() {
    assert_eq!(page_key(1), "c00001");
    assert_eq!(page_key(2), "c00002");
    assert_eq!(page_key(10), "c00010");
    assert_eq!(page_key(123), "c00123");
  }

  #[test]
  fn reads_header() {
    let html = "<font size=\"5\" face=\"Arial\">\n5B&nbsp;</font> <font face=\"Arial\">\nMUE</font>";

    assert_eq!(
      parse_class_header(html),
      Ok(("5B".to_string(), "MUE".to_string()))
    );
  }

  #[test]
  fn reads_numeric_header() {
    let html = "<font>2026&nbsp;</font>\t<font face=\"Arial\">1234</font>";

    assert_eq!(
      parse_class_header(html),
      Ok(("2026".to_string(), "1234".to_string()))
    );
  }

  #[test]
  fn reports_missing_header() {
    assert_eq!(
      parse_class_header("<html><body>Kein Plan</body></html>"),
      Err(ParseError::MissingClassHeader)
    );
  }
}
