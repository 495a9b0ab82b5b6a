//! pipesmith: pipeline builder front end.
//!
//! Reads one JSON request from stdin, writes one JSON response to stdout.
//!
//! Requests:
//!   - `{"action": "preview", "input": "...", "steps": [...]}` → `{"preview": "..."}` or `{"error": "..."}`
//!   - `{"action": "command", "steps": [...], "format": true}` → `{"command": "..."}`
//!   - `{"action": "parse", "command": "..."}` → `{"steps": [...]}` or `{"error": "..."}`
//!
//! Flags: `--config PATH`, `--dump-config`, `--verbose`.

use std::io::Read;

use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};

use pipesmith::config::Config;
use pipesmith::render::Serializer;
use pipesmith::{Step, eval, logging, parse};

#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Request {
    Preview {
        #[serde(default)]
        input: String,
        #[serde(default)]
        steps: Vec<Step>,
    },
    Command {
        #[serde(default)]
        steps: Vec<Step>,
        format: Option<bool>,
    },
    Parse {
        command: String,
    },
}

/// Step-by-step Unix pipeline builder
#[derive(Debug, Parser)]
#[command(name = "pipesmith", version, about, long_about = None)]
struct Cli {
    /// Config overlay to use instead of ~/.config/pipesmith/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Print the merged configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Log at debug level on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn handle(request: Request, config: &Config) -> Value {
    match request {
        Request::Preview { input, steps } => {
            let response = match eval::run(&input, &steps) {
                Ok(preview) => json!({ "preview": preview }),
                Err(e) => json!({ "error": e.to_string() }),
            };
            logging::log_request(
                "preview",
                &format!("{} steps", steps.len()),
                if response.get("error").is_some() { "error" } else { "ok" },
            );
            response
        }
        Request::Command { steps, format } => {
            let formatted = format.unwrap_or(config.settings.format);
            let command = Serializer::from_config(&config.settings).serialize(&steps, formatted);
            logging::log_request("command", &command, "ok");
            json!({ "command": command })
        }
        Request::Parse { command } => match parse(&command) {
            Ok(steps) => {
                logging::log_request("parse", &command, "ok");
                json!({ "steps": steps })
            }
            Err(e) => {
                logging::log_request("parse", &command, &e.to_string());
                json!({ "error": e.to_string() })
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());

    if cli.dump_config {
        match config.to_toml() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("pipesmith: cannot render config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    logging::init(&config.settings, cli.verbose);

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }

    let request: Request = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON parse error: {e}");
            std::process::exit(1);
        }
    };

    println!("{}", handle(request, &config));
}
