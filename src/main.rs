mod debug_report;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use rpgnorm::{DEFAULT_LANGUAGE, Entity, EntityClassifier, FlavorParser, GENERIC_SYSTEM, Registry};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    let overlay;
    let registry = match &config.data {
        Some(dir) => {
            overlay = match Registry::load_dir(dir) {
                Ok(registry) => registry,
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            };
            &overlay
        }
        None => Registry::builtin(),
    };

    let outcome = match &config.mode {
        Mode::ListSystems => list_systems(registry, &config),
        Mode::Entity(raw) => classify_entity(registry, raw, &config),
        Mode::Flavor(input) => parse_flavor(registry, input, &config),
    };

    if let Err((code, message)) = outcome {
        eprintln!("{message}");
        std::process::exit(code);
    }
}

/// Errors carry their exit code: 1 for internal failures, 2 for bad input.
type Outcome = Result<(), (i32, String)>;

fn list_systems(registry: &Registry, config: &CliConfig) -> Outcome {
    if config.json {
        let listing = json!({
            "classification": registry.supported_systems(),
            "languages": registry.language_systems(),
        });
        return print_json(&listing);
    }
    debug_report::print_systems(registry, config.color);
    Ok(())
}

fn classify_entity(registry: &Registry, raw: &str, config: &CliConfig) -> Outcome {
    let entity: Entity =
        serde_json::from_str(raw).map_err(|err| (2, format!("error: invalid --entity JSON: {err}")))?;

    let classifier = EntityClassifier::with_registry(registry, &config.system);
    let included = classifier.is_included(&entity);
    let classification = classifier.explain(Some(&entity));

    if config.json {
        return print_json(&json!({
            "system": config.system,
            "included": included,
            "category": classification.category,
            "reason": classification.reason,
        }));
    }
    debug_report::print_classification(&config.system, &entity, included, &classification, config.color);
    Ok(())
}

fn parse_flavor(registry: &Registry, input: &str, config: &CliConfig) -> Outcome {
    let parser = FlavorParser::with_registry(registry, &config.system, &config.language);
    let res = parser.parse_verbose(input);

    if config.json {
        return print_json(&res.flavor);
    }
    debug_report::print_run(&config.system, &config.language, input, &res, config.color);
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Outcome {
    let text = serde_json::to_string_pretty(value).map_err(|err| (1, format!("error: failed to encode JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Log events go to stderr so `--json` output stays clean; `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

enum Mode {
    Flavor(String),
    Entity(String),
    ListSystems,
}

struct CliConfig {
    mode: Mode,
    system: String,
    language: String,
    data: Option<PathBuf>,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut entity: Option<String> = None;
    let mut list = false;
    let mut system = GENERIC_SYSTEM.to_string();
    let mut language = DEFAULT_LANGUAGE.to_string();
    let mut data: Option<PathBuf> = None;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("rpgnorm {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--list-systems" => list = true,
            "-s" | "--system" => system = expect_value(&mut args, "--system")?,
            "-l" | "--lang" => language = expect_value(&mut args, "--lang")?,
            "-d" | "--data" => data = Some(PathBuf::from(expect_value(&mut args, "--data")?)),
            "-e" | "--entity" => entity = Some(expect_value(&mut args, "--entity")?),
            "--" => {
                let rest = args.by_ref().collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--system=") => system = arg.trim_start_matches("--system=").to_string(),
            _ if arg.starts_with("--lang=") => language = arg.trim_start_matches("--lang=").to_string(),
            _ if arg.starts_with("--data=") => data = Some(PathBuf::from(arg.trim_start_matches("--data="))),
            _ if arg.starts_with("--entity=") => entity = Some(arg.trim_start_matches("--entity=").to_string()),
            _ if arg.starts_with('-') && arg.len() > 1 && !is_modifier(&arg) => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args.by_ref()).collect::<Vec<_>>().join(" ");
                input = Some(rest);
                break;
            }
        }
    }

    let mode = if list {
        if entity.is_some() || input.is_some() {
            return Err("error: --list-systems takes no input".to_string());
        }
        Mode::ListSystems
    } else if let Some(raw) = entity {
        if input.is_some() {
            return Err("error: --entity cannot be combined with flavor text".to_string());
        }
        Mode::Entity(raw)
    } else {
        let input = match input {
            Some(value) => value,
            None => read_stdin_input()?,
        };
        if input.trim().is_empty() {
            return Err(format!("error: no input provided\n\n{}", help_text()));
        }
        Mode::Flavor(input.trim_end_matches(['\r', '\n']).to_string())
    };

    Ok(CliConfig { mode, system, language, data, json, color })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

/// "-2 penalty" is flavor text, not an option.
fn is_modifier(arg: &str) -> bool {
    arg[1..].starts_with(|c: char| c.is_ascii_digit())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "rpgnorm {version}

Classify RPG actors and parse dice-roll flavor text.

Usage:
  rpgnorm [OPTIONS] [--] <flavor...>
  rpgnorm [OPTIONS] --entity '<json>'
  rpgnorm --list-systems

Options:
  -s, --system <id>          Game system id. Default: {system}
  -l, --lang <code>          Language code. Default: {language}
  -e, --entity <json>        Classify an actor record such as
                             '{{\"type\":\"npc\",\"system\":{{\"details\":{{\"cr\":2}}}}}}'
                             instead of parsing flavor text.
  -d, --data <dir>           Overlay classification.yaml and languages/*.yaml
                             from <dir> on top of the bundled data.
  --json                     Print the result as JSON.
  --list-systems             List systems with dedicated support.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Flavor text is read from the remaining arguments, or from stdin when none
are given. Set RUST_LOG=rpgnorm=debug to trace resolution steps.

Exit codes:
  0  Success.
  1  Configuration or internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        system = GENERIC_SYSTEM,
        language = DEFAULT_LANGUAGE,
    )
}
