use serde::Serialize;
use tracing::info;

use crate::class::{resolve_class, ClassInfo};
use crate::clock::Clock;
use crate::config::STYLESHEET;
use crate::rewrite::rewrite;
use crate::transport::Transport;
use crate::week::week_window;
use crate::FetchContext;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanPage {
  pub url: String,
  pub html: String,
  pub week: u8,
}

/// Plans of `class_name` for the current and the next four weeks.
///
/// `Ok(None)` means the class could not be resolved, an empty list means no week is published.
pub async fn get_plans<T: Transport, C: Clock>(
  ctx: &FetchContext<T, C>,
  class_name: &str,
) -> anyhow::Result<Option<Vec<PlanPage>>> {
  match resolve_class(ctx, class_name).await? {
    None => Ok(None),
    Some(info) => Ok(Some(get_class_plans(ctx, &info).await?)),
  }
}

/// Plans of an already resolved class. Weeks that can not be fetched are skipped.
pub async fn get_class_plans<T: Transport, C: Clock>(
  ctx: &FetchContext<T, C>,
  info: &ClassInfo,
) -> anyhow::Result<Vec<PlanPage>> {
  let now = ctx.now();
  let stylesheet = ctx.config().asset_url(STYLESHEET);
  let mut plans = Vec::new();

  for week in week_window(now) {
    let url = ctx.config().plan_url(week, &info.page_key)?;

    let body = match ctx.fetch(&url).await {
      None => continue,
      Some(body) => body,
    };

    plans.push(PlanPage {
      html: rewrite(&body, week, now, &stylesheet)?,
      url: url.to_string(),
      week,
    });
  }

  info!(
    "Found {} plans for class {}",
    plans.len(),
    info.class_name
  );

  Ok(plans)
}
