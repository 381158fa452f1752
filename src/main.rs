// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use toasty::config::{self, Options};
use toasty::{Error, ToastKind, Toasty};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
toasty-demo: emit one toast and print the document while it lives

USAGE:
  toasty-demo [OPTIONS] MESSAGE

OPTIONS:
  --config FILE        Load toast options from a TOML file
  --transition NAME    Transition to animate with (default: fade)
  --kind KIND          info, success, warning or error (default: info)
  --duration MS        Display duration, 0 derives it from the message
  -h, --help           Print this help
";

struct Flags {
    config: Option<PathBuf>,
    transition: Option<String>,
    kind: ToastKind,
    duration: u64,
    message: String,
}

fn parse_flags() -> Result<Option<Flags>, Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let invalid = |err: pico_args::Error| Error::Config(err.to_string());

    let config = args.opt_value_from_str("--config").map_err(invalid)?;
    let transition = args.opt_value_from_str("--transition").map_err(invalid)?;
    let kind = args
        .opt_value_from_fn("--kind", str::parse::<ToastKind>)
        .map_err(invalid)?
        .unwrap_or_default();
    let duration = args
        .opt_value_from_str("--duration")
        .map_err(invalid)?
        .unwrap_or(0);
    let message = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok())
        .unwrap_or_else(|| "Hello from toasty".to_string());

    Ok(Some(Flags {
        config,
        transition,
        kind,
        duration,
        message,
    }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(flags) = parse_flags()? else {
        print!("{HELP}");
        return Ok(());
    };

    let options = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => Options::default(),
    };
    let options = options
        .on_show(|kind| println!("-- {kind} toast shown"))
        .on_hide(|kind| println!("-- {kind} toast hidden"));

    let mut toasty = Toasty::new(options);
    if let Some(name) = &flags.transition {
        toasty.transition(name);
    }

    match flags.kind {
        ToastKind::Info => toasty.info(&flags.message, flags.duration)?,
        ToastKind::Success => toasty.success(&flags.message, flags.duration)?,
        ToastKind::Warning => toasty.warning(&flags.message, flags.duration)?,
        ToastKind::Error => toasty.error(&flags.message, flags.duration)?,
    }
    println!("[{:>5} ms] {}", toasty.now(), toasty.document().body_html());

    while !toasty.is_idle() {
        let before = toasty.document().body_html();
        toasty.tick().await;
        let after = toasty.document().body_html();
        if after != before {
            println!("[{:>5} ms] {}", toasty.now(), after);
        }
    }
    Ok(())
}
