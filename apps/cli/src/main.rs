use std::env;
use std::path::PathBuf;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use envisionment_engine::{build, can_transition, enumerate_all_states, next_states, state_valid};

mod dot;
mod scenario;

use scenario::Scenario;

#[derive(Debug, PartialEq, Eq)]
enum Commands {
    Graph {
        source: ScenarioSource,
        format: OutputFormat,
    },
    States {
        source: ScenarioSource,
        valid_only: bool,
        format: OutputFormat,
    },
    Successors {
        source: ScenarioSource,
        format: OutputFormat,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum ScenarioSource {
    Builtin(String),
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Dot,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_command(&args).and_then(run) {
        Ok(out) => println!("{out}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(command: Commands) -> Result<String, String> {
    match command {
        Commands::Graph { source, format } => {
            let scenario = resolve(source)?;
            let graph = build(&scenario.seed);
            match format {
                OutputFormat::Text => Ok(format!(
                    "states: {}\nedges: {}",
                    graph.node_count(),
                    graph.edge_count()
                )),
                OutputFormat::Json => {
                    let nodes: Vec<_> = graph
                        .nodes()
                        .iter()
                        .map(|(key, state)| {
                            json!({
                                "key": key.as_str(),
                                "state": state.describe(),
                                "valid": state_valid(state),
                            })
                        })
                        .collect();
                    let edges: Vec<_> = graph
                        .edges()
                        .iter()
                        .map(|(from, to)| json!([from.as_str(), to.as_str()]))
                        .collect();
                    Ok(json!({
                        "entity": scenario.entity.name(),
                        "seed": scenario.seed.canonical_key().as_str(),
                        "nodes": nodes,
                        "edges": edges,
                    })
                    .to_string())
                }
                OutputFormat::Dot => Ok(dot::render(&graph)),
            }
        }
        Commands::States {
            source,
            valid_only,
            format,
        } => {
            let scenario = resolve(source)?;
            let mut states = enumerate_all_states(&scenario.entity);
            if valid_only {
                states.retain(state_valid);
            }
            match format {
                OutputFormat::Text => {
                    let mut lines = vec![format!("states: {}", states.len())];
                    for state in &states {
                        let marker = if state_valid(state) { " " } else { "!" };
                        lines.push(format!("{marker} {state}"));
                    }
                    Ok(lines.join("\n"))
                }
                OutputFormat::Json => {
                    let listed: Vec<_> = states
                        .iter()
                        .map(|state| {
                            json!({
                                "key": state.canonical_key().as_str(),
                                "state": state.describe(),
                                "valid": state_valid(state),
                            })
                        })
                        .collect();
                    Ok(json!({
                        "entity": scenario.entity.name(),
                        "count": listed.len(),
                        "states": listed,
                    })
                    .to_string())
                }
                OutputFormat::Dot => Err("dot output is only available for graph".to_string()),
            }
        }
        Commands::Successors { source, format } => {
            let scenario = resolve(source)?;
            let accepted: Vec<_> = next_states(&scenario.seed)
                .into_iter()
                .filter(|candidate| can_transition(&scenario.seed, candidate))
                .collect();
            match format {
                OutputFormat::Text => {
                    let mut lines = vec![
                        format!("from: {}", scenario.seed),
                        format!("successors: {}", accepted.len()),
                    ];
                    for state in &accepted {
                        lines.push(format!("  {state}"));
                    }
                    Ok(lines.join("\n"))
                }
                OutputFormat::Json => {
                    let listed: Vec<_> = accepted
                        .iter()
                        .map(|state| {
                            json!({
                                "key": state.canonical_key().as_str(),
                                "state": state.describe(),
                                "valid": state_valid(state),
                            })
                        })
                        .collect();
                    Ok(json!({
                        "from": scenario.seed.canonical_key().as_str(),
                        "successors": listed,
                    })
                    .to_string())
                }
                OutputFormat::Dot => Err("dot output is only available for graph".to_string()),
            }
        }
    }
}

fn resolve(source: ScenarioSource) -> Result<Scenario, String> {
    match source {
        ScenarioSource::Builtin(name) => scenario::builtin(&name).ok_or_else(|| {
            format!(
                "unknown scenario '{name}'; built-ins: {}",
                scenario::builtin_names().join(", ")
            )
        }),
        ScenarioSource::File(path) => scenario::load(&path),
    }
}

fn parse_command(args: &[String]) -> Result<Commands, String> {
    let Some(cmd) = args.first() else {
        return Err(help_text());
    };

    match cmd.as_str() {
        "graph" => {
            let (source, rest) = parse_source(&args[1..])?;
            let (format, rest) = parse_format(rest)?;
            reject_extra(rest)?;
            Ok(Commands::Graph { source, format })
        }
        "states" => {
            let (source, rest) = parse_source(&args[1..])?;
            let (valid_only, rest) = parse_flag(rest, "--valid");
            let (format, rest) = parse_format(rest)?;
            reject_extra(rest)?;
            Ok(Commands::States {
                source,
                valid_only,
                format,
            })
        }
        "successors" => {
            let (source, rest) = parse_source(&args[1..])?;
            let (format, rest) = parse_format(rest)?;
            reject_extra(rest)?;
            Ok(Commands::Successors { source, format })
        }
        _ => Err(help_text()),
    }
}

fn parse_source(args: &[String]) -> Result<(ScenarioSource, &[String]), String> {
    match args.first().map(String::as_str) {
        Some("--scenario") => {
            let Some(path) = args.get(1) else {
                return Err("--scenario requires a file path".to_string());
            };
            Ok((ScenarioSource::File(PathBuf::from(path)), &args[2..]))
        }
        Some(name) if !name.starts_with("--") => {
            Ok((ScenarioSource::Builtin(name.to_string()), &args[1..]))
        }
        _ => Ok((ScenarioSource::Builtin("container".to_string()), args)),
    }
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> (bool, &'a [String]) {
    match args.first().map(String::as_str) {
        Some(found) if found == flag => (true, &args[1..]),
        _ => (false, args),
    }
}

fn parse_format(args: &[String]) -> Result<(OutputFormat, &[String]), String> {
    match args.first().map(String::as_str) {
        Some("--format") => {
            let format = match args.get(1).map(String::as_str) {
                Some("text") => OutputFormat::Text,
                Some("json") => OutputFormat::Json,
                Some("dot") => OutputFormat::Dot,
                Some(other) => return Err(format!("unknown format: {other}")),
                None => return Err("--format requires text, json or dot".to_string()),
            };
            Ok((format, &args[2..]))
        }
        _ => Ok((OutputFormat::Text, args)),
    }
}

fn reject_extra(args: &[String]) -> Result<(), String> {
    match args.first() {
        Some(extra) => Err(format!("unexpected argument: {extra}")),
        None => Ok(()),
    }
}

fn help_text() -> String {
    "Usage: envision <command>\n  graph [scenario | --scenario FILE] [--format text|json|dot]\n  states [scenario | --scenario FILE] [--valid] [--format text|json]\n  successors [scenario | --scenario FILE] [--format text|json]".to_string()
}
