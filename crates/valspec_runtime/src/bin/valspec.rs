//! valspec CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use valspec_editor::EditorConfig;
use valspec_runtime::{Repl, Session};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    verbose: bool,
    dump_session: bool,
    preview_limit: Option<usize>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "-v" | "--verbose" => config.verbose = true,
            "--dump-session" => config.dump_session = true,
            "--preview-limit" => {
                i += 1;
                if i >= args.len() {
                    return Err("--preview-limit requires a value".into());
                }
                config.preview_limit = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --preview-limit value: {}", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("valspec {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.verbose);

    let mut editor_config = EditorConfig::default();
    if let Some(limit) = config.preview_limit {
        editor_config = editor_config.with_preview_char_limit(limit);
    }

    let mut repl = Repl::new()?.with_session(Session::with_config(editor_config));

    // Run any specified scripts
    for file in &config.files {
        repl.eval_file(file).map_err(|e| match &e.context {
            Some(context) => format!("{e} ({context})"),
            None => e.to_string(),
        })?;
    }

    if config.dump_session {
        dump_session(repl.session());
    }

    // If batch mode, exit now
    if config.batch_mode {
        return Ok(());
    }

    // If scripts were run, suppress banner since context is established
    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn dump_session(session: &Session) {
    println!("\x1b[1;36m=== Session ===\x1b[0m");
    for enumeration in session.enumerations() {
        println!("enum {} = {}", enumeration.path, enumeration.members.join(", "));
    }
    for parameter in session.parameters() {
        println!(
            "{}: {}{} = {}",
            parameter.name, parameter.ty, parameter.multiplicity, parameter.value
        );
    }
    println!();
}

fn print_help() {
    println!(
        "\x1b[1mvalspec\x1b[0m - Typed parameter editing for query-builder values

\x1b[1mUSAGE:\x1b[0m
    valspec [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Command scripts to run before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -b, --batch            Run scripts and exit (no REPL)
    -v, --verbose          Log editor activity to stderr (RUST_LOG overrides)
    --preview-limit N      Characters shown in collection previews (default 50)
    --dump-session         Print enumerations and parameters after scripts

\x1b[1mEXAMPLES:\x1b[0m
    valspec                          Start interactive REPL
    valspec form.vs                  Run form.vs, then start REPL
    valspec -b form.vs               Run form.vs and exit
    RUST_LOG=valspec_codec=trace valspec -b form.vs

\x1b[1mREPL COMMANDS:\x1b[0m
    :enum model::Color Red,Green   Declare an enumeration
    :param ids Integer [*]         Declare a parameter
    :set ids 1,2,3                 Edit a parameter through its editor
    :set limit 2 ^ 10              Number fields evaluate arithmetic
    :set asOf previousDayOfWeek(Friday)
    :show                          Show all parameters
    :help                          List all commands
    Ctrl+D                         Exit REPL
    Ctrl+C                         Cancel current input"
    );
}
