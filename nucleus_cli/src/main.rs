//! # Nucleus CLI Application
//!
//! Line-oriented shell over a single in-memory hub. State lasts as long as
//! the process; restarting resets to the seed materials and an empty feed.
//!
//! Usage:
//!   nucleus_cli [--config <settings.json>]
//!
//! Set `RUST_LOG=debug` to see advisor traces.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

use nucleus_core::api;
use nucleus_core::designs::PartSelector;
use nucleus_core::hub::{EvaluateRequest, MaterialQuery, NucleusHub, StrengthInput, SubmitRequest};
use nucleus_core::settings::HubSettings;
use nucleus_core::NucleusError;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    List(Option<String>),
    Recent(Option<usize>),
    Designs,
    Feed,
    Eval {
        material_id: String,
        design: Option<String>,
        part: Option<PartSelector>,
    },
    Add {
        strength: String,
        contributor: String,
        name: String,
    },
    Json {
        operation: String,
        body: String,
    },
    Snapshot,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match head.to_lowercase().as_str() {
        "list" | "ls" => Ok(Command::List((!rest.is_empty()).then(|| rest.to_string()))),
        "recent" => match args.first() {
            Some(n) => n
                .parse()
                .map(|n| Command::Recent(Some(n)))
                .map_err(|_| format!("recent: '{}' is not a count", n)),
            None => Ok(Command::Recent(None)),
        },
        "designs" => Ok(Command::Designs),
        "feed" => Ok(Command::Feed),
        "eval" | "evaluate" => match args.as_slice() {
            [material_id, rest @ ..] if rest.len() <= 2 => Ok(Command::Eval {
                material_id: material_id.to_string(),
                design: rest.first().map(|d| d.to_string()),
                part: rest.get(1).map(|p| PartSelector::parse(p)),
            }),
            _ => Err("usage: eval <material_id> [design] [part]".to_string()),
        },
        "add" => match args.as_slice() {
            [strength, contributor, name @ ..] if !name.is_empty() => Ok(Command::Add {
                strength: strength.to_string(),
                contributor: contributor.to_string(),
                name: name.join(" "),
            }),
            _ => Err("usage: add <strength> <contributor> <name...>".to_string()),
        },
        "json" => match rest.split_once(char::is_whitespace) {
            Some((operation, body)) => Ok(Command::Json {
                operation: operation.to_string(),
                body: body.trim().to_string(),
            }),
            None if !rest.is_empty() => Ok(Command::Json {
                operation: rest.to_string(),
                body: String::new(),
            }),
            None => Err("usage: json <operation> [body]".to_string()),
        },
        "snapshot" => Ok(Command::Snapshot),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list [search]                      List materials (insertion order)");
    println!("  recent [n]                         Newest materials first");
    println!("  designs                            Designs and their parts");
    println!("  feed                               Activity feed, newest first");
    println!("  eval <material_id> [design] [part] Wall thickness advice");
    println!("  add <strength> <contributor> <name...>");
    println!("                                     Submit a community material");
    println!("  json <operation> [body]            Raw API call (evaluate, submit, list, recent, feed)");
    println!("  snapshot                           Hub state as JSON");
    println!("  quit");
}

fn print_error(err: &NucleusError) {
    eprintln!("Error: {}", err);
    if let Ok(json) = serde_json::to_string_pretty(err) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn status_icon(ok: bool) -> &'static str {
    if ok { "[OK]" } else { "[RIBS]" }
}

/// Execute one command. Returns false when the shell should exit.
fn run(hub: &mut NucleusHub, command: Command) -> bool {
    match command {
        Command::List(search) => {
            let query = MaterialQuery { search, limit: None };
            for m in hub.list_materials(&query) {
                println!(
                    "  {:<10} {:<24} strength {:>6.1}  {:<10} carbon {:<8} by {}",
                    m.id,
                    m.name,
                    m.strength,
                    m.material_type.code(),
                    m.carbon_or_unknown(),
                    m.contributor
                );
            }
        }
        Command::Recent(limit) => {
            for m in hub.recent_materials(limit) {
                println!("  {:<10} {} ({})", m.id, m.name, m.contributor);
            }
        }
        Command::Designs => {
            for (id, design) in hub.catalog().designs() {
                println!("  {} - {}", id, design.name);
                for (i, part) in design.parts.iter().enumerate() {
                    println!("    #{} {:<8} req {:>6.1}  orig {:>5.1}", i, part.id, part.req, part.orig);
                }
            }
        }
        Command::Feed => {
            if hub.feed().is_empty() {
                println!("  (no recent activity)");
            }
            for entry in hub.feed().iter() {
                println!("  {}", entry);
            }
        }
        Command::Eval {
            material_id,
            design,
            part,
        } => {
            let request = EvaluateRequest {
                material_id,
                design_id: design,
                part,
                custom_part: None,
            };
            match hub.evaluate(&request) {
                Ok(result) => {
                    println!("═══════════════════════════════════════");
                    println!("  Thickness: {:.1} mm {}", result.thickness, status_icon(result.meets_requirement()));
                    println!("  Ratio:     {:.3}", result.ratio);
                    println!("  Carbon:    {}", result.carbon);
                    println!("  Tip:       {}", result.tip);
                    for hint in &result.hints {
                        println!("   - {}", hint);
                    }
                    println!("═══════════════════════════════════════");
                    if let Ok(json) = serde_json::to_string_pretty(&result) {
                        println!("{}", json);
                    }
                }
                Err(e) => print_error(&e),
            }
        }
        Command::Add {
            strength,
            contributor,
            name,
        } => {
            let request = SubmitRequest {
                name: Some(name),
                strength: Some(StrengthInput::Text(strength)),
                contributor: Some(contributor),
            };
            match hub.submit(&request) {
                Ok(response) => println!("Added material {}", response.material_id),
                Err(e) => print_error(&e),
            }
        }
        Command::Json { operation, body } => {
            println!("{}", api::dispatch(hub, &operation, &body));
        }
        Command::Snapshot => match hub.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => print_error(&e),
        },
        Command::Help => print_help(),
        Command::Quit => return false,
    }
    true
}

const USAGE: &str = "Usage: nucleus_cli [--config <settings.json>]";

/// Command-line options.
#[derive(Debug, Default, PartialEq)]
struct Options {
    config: Option<String>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| "--config requires a path".to_string())?;
                options.config = Some(path.clone());
                i += 1;
            }
            "--help" | "-h" => options.help = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

fn load_settings(path: &str) -> Result<HubSettings, NucleusError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| NucleusError::invalid_input("config", path, e.to_string()))?;
    HubSettings::from_json(&raw)
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if options.help {
        println!("{}", USAGE);
        println!();
        print_help();
        return;
    }

    let settings = match options.config.as_deref().map(load_settings) {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            print_error(&e);
            std::process::exit(1);
        }
        None => HubSettings::default(),
    };

    let mut hub = match NucleusHub::with_settings(settings) {
        Ok(hub) => hub,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };

    println!("Nucleus - Material Thickness Advisor");
    println!("====================================");
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("nucleus> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                if !run(&mut hub, command) {
                    break;
                }
            }
            Err(message) => eprintln!("{}", message),
        }
    }
}
