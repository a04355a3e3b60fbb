use std::env;
use std::path::PathBuf;

use snafu::{OptionExt, ResultExt, Snafu};

use chat_sidebar::replay::{self, ReplayError};
use chat_sidebar::settings::SettingsStore;

#[derive(Debug, Clone)]
struct ReplayArgs {
    script_path: PathBuf,
    settings_path: Option<PathBuf>,
}

#[derive(Debug, Snafu)]
enum RunnerError {
    #[snafu(display("missing replay script path"))]
    MissingScript { stage: &'static str },
    #[snafu(display("missing value for argument '{arg}'"))]
    MissingArgumentValue {
        stage: &'static str,
        arg: &'static str,
    },
    #[snafu(display("unknown argument '{raw}'"))]
    UnknownArgument { stage: &'static str, raw: String },
    #[snafu(display("replay failed: {source}"))]
    Replay {
        stage: &'static str,
        source: ReplayError,
    },
}

type RunnerResult<T> = Result<T, RunnerError>;

/// Replays a JSON event script and prints one JSON snapshot per event.
///
/// Usage: `sidebar-replay <script.json> [--settings <path>]`
fn main() {
    // Logs go to stderr so stdout stays one frame per line.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if let Err(error) = run() {
        eprintln!("replay_error={error}");
        std::process::exit(1);
    }
}

fn run() -> RunnerResult<()> {
    let args = parse_args(env::args().skip(1))?;

    let settings_store = match args.settings_path {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::load(),
    };
    let settings = settings_store.settings();

    let script = replay::load_script(&args.script_path).context(ReplaySnafu {
        stage: "load-script",
    })?;
    let frames = replay::run_script(script, &settings).context(ReplaySnafu {
        stage: "run-script",
    })?;

    for frame in &frames {
        let line = replay::encode_frame(frame).context(ReplaySnafu {
            stage: "encode-frame",
        })?;
        println!("{line}");
    }

    tracing::info!("replayed {} events", frames.len());
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> RunnerResult<ReplayArgs> {
    let mut script_path = None;
    let mut settings_path = None;
    let mut pending = args.into_iter();

    while let Some(argument) = pending.next() {
        match argument.as_str() {
            "--settings" => {
                let value = pending.next().context(MissingArgumentValueSnafu {
                    stage: "parse-args-settings-value",
                    arg: "--settings",
                })?;
                settings_path = Some(PathBuf::from(value));
            }
            raw if raw.starts_with("--") || script_path.is_some() => {
                return UnknownArgumentSnafu {
                    stage: "parse-args",
                    raw: argument,
                }
                .fail();
            }
            _ => script_path = Some(PathBuf::from(argument)),
        }
    }

    Ok(ReplayArgs {
        script_path: script_path.context(MissingScriptSnafu {
            stage: "parse-args-script-required",
        })?,
        settings_path,
    })
}
