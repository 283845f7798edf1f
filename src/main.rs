//! Replay Refiner - command-line shell around the refinement pipeline.

use replay_refiner::app::cli::{Cli, Commands, ConfigAction};
use replay_refiner::app::config::Config;
use replay_refiner::refinement::ScriptRefiner;
use replay_refiner::workflow::{Recording, ReplayScript};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // `init` may name a config file that does not exist yet
    let initializing = matches!(cli.command, Commands::Init { .. });
    let config = match &cli.config {
        Some(path) if path.exists() || !initializing => Config::load(path)?,
        Some(_) => Config::default(),
        None => Config::load_default()?,
    };
    let config_path = Config::resolve_path(cli.config.as_ref());

    match cli.command {
        Commands::Refine {
            input,
            output,
            name,
        } => {
            run_refine(&input, output, name, &config)?;
        }
        Commands::Goal { input } => {
            run_goal(&input, &config)?;
        }
        Commands::Summarize { input } => {
            run_summarize(&input)?;
        }
        Commands::List { detailed } => {
            run_list(detailed, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config, &config_path)?;
        }
        Commands::Config { action } => {
            run_config(action, &config, &config_path)?;
        }
    }

    Ok(())
}

fn load_recording(input: &Path) -> anyhow::Result<Recording> {
    if !input.exists() {
        anyhow::bail!("Session file not found: {:?}", input);
    }
    let recording = Recording::load(input)?;
    info!(
        "Loaded session '{}' with {} events",
        recording.metadata.name,
        recording.len()
    );
    Ok(recording)
}

fn run_refine(
    input: &Path,
    output: Option<PathBuf>,
    name: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let recording = load_recording(input)?;
    let refiner = ScriptRefiner::with_classifier(config.refine.classifier());

    let mut script = ReplayScript::from_recording(&recording, &refiner);
    if let Some(name) = name {
        script = script.with_name(name);
    }

    if script.is_empty() {
        warn!("Nothing in the session reaches a stable outcome; script has no steps");
    }

    let output_path = output.unwrap_or_else(|| config.scripts_dir().join(script.file_name()));
    script.save(&output_path, config.output.pretty_json)?;
    info!("Saved script to {:?}", output_path);

    println!("\nScript Refined Successfully!");
    println!("  Name: {}", script.metadata.name);
    println!("  Summary: {}", script.summary);
    println!(
        "  Steps: {} (from {} events, {:.0}% removed)",
        script.steps.len(),
        script.metadata.source_event_count,
        script.reduction_ratio() * 100.0
    );
    println!("  Output: {:?}", output_path);

    Ok(())
}

fn run_goal(input: &Path, config: &Config) -> anyhow::Result<()> {
    let recording = load_recording(input)?;
    let refiner = ScriptRefiner::with_classifier(config.refine.classifier());
    let (script, goal) = refiner.refine_with_goal(&recording.events);

    let Some(goal) = goal else {
        println!("Session is empty; no goal deduced");
        return Ok(());
    };

    println!("Terminal state of '{}':", recording.metadata.name);
    println!("  Completed tasks:");
    if goal.completed_tasks().is_empty() {
        println!("    (none)");
    }
    for task in goal.completed_tasks() {
        println!("    - {}", task);
    }
    println!("  Form values:");
    if goal.form_values().is_empty() {
        println!("    (none)");
    }
    for (target, value) in goal.form_values() {
        println!("    - {} = {:?}", target, value);
    }

    let unreached = goal.necessary_targets().len() - script.len();
    if unreached > 0 {
        println!("  {} goal target(s) have no reproducing action", unreached);
    }

    Ok(())
}

fn run_summarize(input: &Path) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Script file not found: {:?}", input);
    }
    let script = ReplayScript::load(input)?;
    println!("{}: {}", script.metadata.name, script.summary);
    for (i, step) in script.steps.iter().enumerate() {
        println!("  {}. {:?} {} @ {}ms", i + 1, step.kind, step.target, step.recorded_at);
    }
    Ok(())
}

fn run_list(detailed: bool, config: &Config) -> anyhow::Result<()> {
    let sessions_dir = config.sessions_dir();

    if !sessions_dir.exists() {
        println!("No sessions found in {}", sessions_dir.display());
        return Ok(());
    }

    println!("Sessions in {:?}:", sessions_dir);

    let mut entries: Vec<_> = std::fs::read_dir(&sessions_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.path());

    for entry in &entries {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        if detailed {
            match Recording::load(&path) {
                Ok(recording) => {
                    let m = &recording.metadata;
                    let duration_secs = m.duration_ms as f64 / 1000.0;
                    let goal_str = m.goal.as_deref().unwrap_or("-");
                    println!(
                        "  {}  ({} events, {:.1}s, goal: {})",
                        file_name,
                        recording.len(),
                        duration_secs,
                        goal_str
                    );
                }
                Err(_) => {
                    let fs_meta = entry.metadata()?;
                    println!("  {}  ({} bytes, failed to parse)", file_name, fs_meta.len());
                }
            }
        } else {
            println!("  {}", file_name);
        }
    }

    if entries.is_empty() {
        println!("  (none)");
    }

    Ok(())
}

fn run_init(force: bool, config: &Config, config_path: &PathBuf) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save(config_path)?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(config.sessions_dir())?;
    std::fs::create_dir_all(config.scripts_dir())?;

    println!("\nCreated directories:");
    println!("  Sessions: {:?}", config.sessions_dir());
    println!("  Scripts: {:?}", config.scripts_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config, config_path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", config_path);
            println!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
