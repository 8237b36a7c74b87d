//! Text substitutions on the Untis plan template.

use anyhow::anyhow;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use time::PrimitiveDateTime;

use crate::week::{day_offset_phrase, days_until_start, format_date, start_of_week};

const UPSTREAM_STYLESHEET: &str = "../../untisinfo.css";

const DATE_HEADER_OPEN: &str = r##"<font size="6" face="Arial" color="#0000FF">"##;
const DATE_HEADER_CLOSE: &str = "&nbsp;</font>";
const STATUS_OPEN: &str = r#"<font face="Arial">"#;
const STATUS_CLOSE: &str =
  r#"</font><BR><TABLE border="3" rules="all" cellpadding="1" cellspacing="1">"#;

static DATE_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(
    "{}([^<]*){}",
    regex::escape(DATE_HEADER_OPEN),
    regex::escape(DATE_HEADER_CLOSE)
  ))
  .unwrap()
});
static STATUS_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(
    "{}([^<]*){}",
    regex::escape(STATUS_OPEN),
    regex::escape(STATUS_CLOSE)
  ))
  .unwrap()
});

/// Prepares a fetched plan of `week` for display at `now`.
///
/// Points the stylesheet to `stylesheet_href`, drops line breaks, shows the start date of the
/// week in the header and replaces the status line above the table with the distance to it.
pub fn rewrite(
  html: &str,
  week: u8,
  now: PrimitiveDateTime,
  stylesheet_href: &str,
) -> anyhow::Result<String> {
  let start = start_of_week(week, now.year())
    .ok_or_else(|| anyhow!("week {} has no start in {}", week, now.year()))?;

  let html = html.replace(UPSTREAM_STYLESHEET, stylesheet_href).replace('\n', "");
  let html = replace_date_header(&html, &format_date(start));
  let html = replace_status(&html, &day_offset_phrase(days_until_start(start, now)));

  Ok(html)
}

pub fn replace_date_header(html: &str, date: &str) -> String {
  DATE_HEADER_REGEX
    .replace_all(html, |_: &Captures| {
      format!("{DATE_HEADER_OPEN}{date}{DATE_HEADER_CLOSE}")
    })
    .into_owned()
}

pub fn replace_status(html: &str, status: &str) -> String {
  STATUS_REGEX
    .replace_all(html, |_: &Captures| format!("{STATUS_OPEN}{status}{STATUS_CLOSE}"))
    .into_owned()
}
