use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use hgg_untis::{ClassInfo, PlanPage};

pub(crate) fn print_class(info: &ClassInfo) {
  println!("{:<15}{}", "Klasse:", info.class_name);
  println!("{:<15}{}", "Klassenlehrer:", info.teacher_code);
  println!("{:<15}{}", "Seite:", info.page_key);
}

pub(crate) fn print_plans(plans: &[PlanPage]) {
  for plan in plans {
    println!("KW {:>2}  {}", plan.week, plan.url);
  }
}

pub(crate) fn write_plans(dir: &Path, plans: &[PlanPage]) -> anyhow::Result<()> {
  fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

  for plan in plans {
    let path = dir.join(format!("{}.html", plan.week));
    fs::write(&path, &plan.html).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote week {} to {}", plan.week, path.display());
  }

  Ok(())
}
