//! PlanDraft Application
//!
//! Native command-line shell around the core editor: user settings, per-project
//! plan files, replay of recorded host input, and applying generated layouts.

mod config;
mod generate;
mod script;
mod session;

pub use config::{AppSettings, DesignerSettings};
pub use generate::PayloadFileGenerator;
pub use script::{HostEvent, ReplayReport, apply_event, parse_script, replay};
pub use session::Session;

use clap::{Parser, Subcommand};
use plandraft_core::snap::normalize_degrees;
use plandraft_core::storage::{FileStorage, PlanStorage, StorageError};
use plandraft_core::{EditorConfig, PlanError, Scene, generator};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid layout: {0}")]
    Plan(#[from] PlanError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Config(String),
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "plandraft")]
#[command(about = "PlanDraft floor-plan editor shell")]
#[command(version)]
pub struct Cli {
    /// Directory holding plan files (default: the user's local data directory)
    #[arg(long, env = "PLANDRAFT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Settings file (default: settings.json in the user's config directory)
    #[arg(long, env = "PLANDRAFT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Editor toggles that override the settings file for one run.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ToggleArgs {
    /// Start with the grid shown or hidden
    #[arg(long)]
    pub grid: Option<bool>,

    /// Start with snapping on or off
    #[arg(long)]
    pub snapping: Option<bool>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a project's plan
    Show {
        project: String,
        /// Print the stored JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List projects with a stored plan
    List,
    /// Discard a project's stored plan so it starts from the starter plan again
    Reset { project: String },
    /// Replay recorded input against a project's plan and save the result
    Replay {
        project: String,
        /// JSON array of host events
        script: PathBuf,
        #[command(flatten)]
        toggles: ToggleArgs,
        /// Report the result without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Replace a project's plan with a generated layout
    Generate {
        project: String,
        /// Layout request text
        #[arg(long)]
        request: String,
        /// File holding the generator's JSON response
        #[arg(long)]
        payload: PathBuf,
    },
    /// Show or change the designer defaults
    Settings {
        #[arg(long)]
        default_grid_visible: Option<bool>,
        #[arg(long)]
        default_snapping_enabled: Option<bool>,
    },
    /// Print the generator response schema, or the prompt for a request
    Schema {
        #[arg(long)]
        prompt: Option<String>,
    },
}

fn settings_path(cli: &Cli) -> Result<PathBuf, AppError> {
    cli.config
        .clone()
        .or_else(AppSettings::default_path)
        .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))
}

fn open_storage(cli: &Cli) -> Result<FileStorage, AppError> {
    let storage = match &cli.data_dir {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Plan storage at {}", storage.base_path().display());
    Ok(storage)
}

/// Text table of a plan, one element per line.
pub fn describe(scene: &Scene) -> String {
    let mut out = format!("{} elements\n", scene.len());
    for element in scene.iter() {
        out.push_str(&format!(
            "{:<14} {:<24} x={:<8.1} y={:<8.1} w={:<7.1} h={:<7.1} r={:.1}\n",
            element.kind.as_str(),
            element.id,
            element.x,
            element.y,
            element.width,
            element.height,
            normalize_degrees(element.rotation),
        ));
    }
    out
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<(), AppError> {
    match &cli.command {
        Command::Show { project, json } => {
            let storage = open_storage(&cli)?;
            let stored = pollster::block_on(storage.exists(project))?;
            let session = Session::open(&storage, project, EditorConfig::default(), Default::default())?;
            let scene = session.editor.committed_scene();
            if *json {
                println!("{}", scene.to_json()?);
            } else {
                if !stored {
                    println!("Project {} has no stored plan; showing the starter plan", project);
                }
                print!("{}", describe(scene));
            }
        }
        Command::List => {
            let storage = open_storage(&cli)?;
            for project in pollster::block_on(storage.list())? {
                println!("{}", project);
            }
        }
        Command::Reset { project } => {
            let storage = open_storage(&cli)?;
            pollster::block_on(storage.delete(project))?;
            println!("Project {} reset to the starter plan", project);
        }
        Command::Replay {
            project,
            script,
            toggles,
            dry_run,
        } => {
            let mut settings = AppSettings::load(&settings_path(&cli)?)?.editor_settings();
            if let Some(grid) = toggles.grid {
                settings.grid_visible = grid;
            }
            if let Some(snapping) = toggles.snapping {
                settings.snapping_enabled = snapping;
            }

            let events = parse_script(&fs::read_to_string(script)?)?;
            let storage = open_storage(&cli)?;
            let mut session = Session::open(&storage, project, EditorConfig::default(), settings)?;
            let report = replay(&mut session.editor, &events);
            if !*dry_run {
                session.save()?;
            }
            println!(
                "Replayed {} events ({} unbound keys); plan has {} elements",
                report.events,
                report.ignored_keys,
                session.editor.committed_scene().len()
            );
        }
        Command::Generate {
            project,
            request,
            payload,
        } => {
            let storage = open_storage(&cli)?;
            let mut session = Session::open(&storage, project, EditorConfig::default(), Default::default())?;
            let source = PayloadFileGenerator::new(payload.clone());
            let elements = pollster::block_on(generator::generate_layout(&source, request))?;
            session.editor.apply_generated_layout(elements);
            session.save()?;
            println!(
                "Project {} now has {} elements",
                session.project_id(),
                session.editor.committed_scene().len()
            );
        }
        Command::Settings {
            default_grid_visible,
            default_snapping_enabled,
        } => {
            let path = settings_path(&cli)?;
            let mut settings = AppSettings::load(&path)?;
            let changed = default_grid_visible.is_some() || default_snapping_enabled.is_some();
            if let Some(grid) = default_grid_visible {
                settings.designer.default_grid_visible = *grid;
            }
            if let Some(snapping) = default_snapping_enabled {
                settings.designer.default_snapping_enabled = *snapping;
            }
            if changed {
                settings.save(&path)?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Schema { prompt } => match prompt {
            Some(request) => println!("{}", generator::layout_prompt(request)),
            None => println!("{}", serde_json::to_string_pretty(&generator::response_schema())?),
        },
    }
    Ok(())
}
