use clap::Parser;
use microbench_harness::clock::MonotonicClock;
use microbench_harness::config::{self, BenchConfig};
use microbench_harness::harness::{Driver, Measured};
use microbench_harness::report::{self, Format, RunLabel};
use microbench_harness::schema::{BenchReport, Measurement, RunMeta, SCHEMA_VERSION};
use microbench_harness::{Result, Task};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Filter directives for diagnostics on stderr, e.g. `MICROBENCH_LOG=debug`.
const LOG_ENV: &str = "MICROBENCH_LOG";

/// Options that take the following token as their value.
const VALUE_OPTIONS: [&str; 3] = ["--format", "--impl-name", "--out"];
const FLAG_OPTIONS: [&str; 2] = ["-h", "--help"];

#[derive(Parser, Debug)]
#[command(name = "microbench")]
#[command(about = "Micro-benchmark harness (RESULT/CHECKSUM/TIME_NS output)")]
#[command(
    after_help = "Environment: BENCH_REPS (repetitions, `_` separators allowed), WARMUP, SEED.\n\
                  Malformed values fall back to the workload's defaults."
)]
struct Args {
    /// Workload to run.
    #[arg(value_enum)]
    task: Task,

    /// Workload size, then (var_mc only) step count and confidence level.
    ///
    /// Taken as raw text, even when it starts with `-`: a value that is not
    /// entirely numeric, or out of range, is ignored in favour of the default.
    #[arg(value_name = "ARG")]
    positionals: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Lines)]
    format: Format,

    /// Implementation label for `report` and `json` output.
    #[arg(long, default_value = "rust")]
    impl_name: String,

    /// Where to write the report. If omitted, prints to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Move recognised options ahead of a `--` separator so that every other
/// token, including ones starting with `-`, reaches the positional list as
/// raw text and is validated by `config::resolve` instead of by clap.
fn normalize_args(raw: Vec<OsString>) -> Vec<OsString> {
    let mut iter = raw.into_iter();
    let mut options: Vec<OsString> = iter.next().into_iter().collect();
    let mut positionals = Vec::new();

    while let Some(arg) = iter.next() {
        let (separator, value_option, inline_value, flag) = {
            let text = arg.to_string_lossy();
            let name = text.split('=').next().unwrap_or_default();
            (
                text == "--",
                VALUE_OPTIONS.contains(&name),
                text.contains('='),
                FLAG_OPTIONS.contains(&&*text),
            )
        };

        if separator {
            positionals.extend(iter.by_ref());
            break;
        } else if value_option {
            options.push(arg);
            if !inline_value {
                options.extend(iter.next());
            }
        } else if flag {
            options.push(arg);
        } else {
            positionals.push(arg);
        }
    }

    options.push(OsString::from("--"));
    options.extend(positionals);
    options
}

fn now_utc() -> String {
    // Avoid adding chrono dependency; seconds since the epoch are enough to
    // order reports.
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    // Best-effort: read from environment set by CI/build scripts.
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render(args: &Args, cfg: &BenchConfig, m: &Measured) -> Result<String> {
    let label = RunLabel {
        impl_name: &args.impl_name,
        task: args.task.name(),
        size: cfg.size,
    };
    match args.format {
        Format::Lines => Ok(report::render_lines(m)),
        Format::Report => Ok(report::render_report(label, m)),
        Format::Json => {
            let doc = BenchReport {
                run: RunMeta {
                    schema_version: SCHEMA_VERSION,
                    harness_version: env!("CARGO_PKG_VERSION").to_string(),
                    impl_name: args.impl_name.clone(),
                    seed: cfg.seed,
                    timestamp_utc: now_utc(),
                    git_sha: git_sha_short(),
                },
                measurements: vec![Measurement::from_measured(label.task, cfg.size, m)],
            };
            let mut json = serde_json::to_string_pretty(&doc)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn emit(args: &Args, text: &str) -> Result<()> {
    if let Some(out) = &args.out {
        fs::write(out, text)?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let env = |key: &str| std::env::var(key).ok();
    let cfg = config::resolve(&args.positionals, &env, args.task.defaults());

    let mut driver = Driver::new(MonotonicClock::new());
    driver.run(args.task, &cfg, |m| {
        let text = render(args, &cfg, m)?;
        emit(args, &text)
    })
}

fn main() -> ExitCode {
    let args = match Args::try_parse_from(normalize_args(std::env::args_os().collect())) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures.
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("microbench: {e}");
            ExitCode::from(1)
        }
    }
}
