use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Url;
use time::UtcOffset;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use hgg_untis::{
  fetch_directory, get_class_plans, resolve_class, Config, FetchContext, SystemClock,
};

use crate::output::{print_class, print_plans, write_plans};

mod output;

const DIRECTORY_FAILURE: &str = "Irgendwas ist falsch gelaufen... Tut uns leid";
const PLAN_FAILURE: &str = "Hmm... Irgendwas ist falsch gelaufen";

#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Args {
  #[arg(
    long,
    short,
    env = "HGG_PLAN_BASE_URL",
    default_value = hgg_untis::config::DEFAULT_BASE_URL
  )]
  base_url: Url,
  /// Path the rewritten pages load `untisinfo.css` from.
  #[arg(
    long,
    short,
    env = "HGG_PLAN_STATIC_PATH",
    default_value = hgg_untis::config::DEFAULT_STATIC_PATH
  )]
  static_path: String,
  /// Seconds identical upstream requests are answered from cache.
  #[arg(long, env = "HGG_PLAN_CACHE_TTL", default_value_t = 3)]
  cache_ttl: u64,
  /// Hours east of UTC, detected from the system if omitted.
  #[arg(long, env = "HGG_PLAN_UTC_OFFSET", allow_hyphen_values = true)]
  utc_offset: Option<i8>,
  #[arg(long, env = "HGG_PLAN_SENTRY_DSN")]
  sentry_dsn: Option<String>,
  /// Print results as JSON.
  #[arg(long, global = true)]
  json: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List all classes published upstream.
  Classes {
    /// Also list teachers, rooms and other groups.
    #[arg(long)]
    other: bool,
  },
  /// Show page key and teacher of a class.
  Resolve { class: String },
  /// Fetch the plans of a class for the current and the next four weeks.
  Plans {
    class: String,
    /// Directory to write each rewritten plan to, as `{week}.html`.
    #[arg(long, short)]
    out: Option<PathBuf>,
  },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
  let args = Args::parse();

  // the local offset can only be detected as long as no other thread is running
  let clock = match args.utc_offset {
    Some(hours) => SystemClock::new(UtcOffset::from_hms(hours, 0, 0)?),
    None => SystemClock::local(),
  };

  let _sentry = args.sentry_dsn.as_deref().map(|dsn| {
    sentry::init((
      dsn,
      sentry::ClientOptions {
        release: sentry::release_name!(),
        ..Default::default()
      },
    ))
  });

  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(sentry_tracing::layer())
    .init();

  let ctx = FetchContext::new(config(&args), clock);
  info!("Using {} at {}", ctx.config().base_url, ctx.now());

  match run(&args, &ctx).await {
    Ok(code) => Ok(code),
    Err(err) => {
      warn!("Unable to complete request: {:#}", err);
      sentry::integrations::anyhow::capture_anyhow(&err);
      Err(err)
    }
  }
}

fn config(args: &Args) -> Config {
  let mut base_url = args.base_url.clone();
  if !base_url.path().ends_with('/') {
    base_url.set_path(&format!("{}/", base_url.path()));
  }

  Config {
    base_url,
    static_path: args.static_path.clone(),
    cache_ttl: Duration::from_secs(args.cache_ttl),
  }
}

async fn run(args: &Args, ctx: &FetchContext) -> anyhow::Result<ExitCode> {
  match &args.command {
    Command::Classes { other } => {
      let directory = match fetch_directory(ctx).await? {
        None => return Ok(failure(DIRECTORY_FAILURE)),
        Some(directory) => directory,
      };

      if args.json {
        println!("{}", serde_json::to_string_pretty(&directory)?);
      } else {
        for class in &directory.classes {
          println!("{class}");
        }
        if *other {
          for group in &directory.other {
            println!("{group}");
          }
        }
      }
    }
    Command::Resolve { class } => {
      let info = match resolve_class(ctx, class).await? {
        None => return Ok(failure(DIRECTORY_FAILURE)),
        Some(info) => info,
      };

      if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
      } else {
        print_class(&info);
      }
    }
    Command::Plans { class, out } => {
      let info = match resolve_class(ctx, class).await? {
        None => return Ok(failure(PLAN_FAILURE)),
        Some(info) => info,
      };

      let plans = get_class_plans(ctx, &info).await?;
      if plans.is_empty() {
        return Ok(failure(PLAN_FAILURE));
      }

      if let Some(out) = out {
        write_plans(out, &plans)?;
      }

      if args.json {
        println!(
          "{}",
          serde_json::to_string_pretty(&serde_json::json!({
            "info": info,
            "plans": plans,
          }))?
        );
      } else {
        print_class(&info);
        print_plans(&plans);
      }
    }
  }

  Ok(ExitCode::SUCCESS)
}

fn failure(message: &str) -> ExitCode {
  eprintln!("{message}");
  ExitCode::FAILURE
}
