use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

use app_release::cli::orchestration::{run_release_workflow, ReleaseArgs, WorkflowResult};
use app_release::config;
use app_release::logging::{self, LogLevel};
use app_release::registry::AppRegistry;
use app_release::runner::ShellRunner;
use app_release::ui;
use app_release::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "release",
    version,
    about = "Bump, commit, push and tag a mobile app release"
)]
struct Args {
    /// ios | android
    platform: Option<String>,

    /// production | stage | feature
    environment: Option<String>,

    /// App name as registered in ~/.projects.config.json
    app_name: Option<String>,

    /// patch | minor | major (default: patch)
    bump_kind: Option<String>,

    #[arg(long = "tagname", help = "Custom tag prefix used instead of the environment")]
    tagname: Option<String>,

    #[arg(long, help = "App registry path (default: ~/.projects.config.json)")]
    registry: Option<PathBuf>,

    #[arg(short, long, help = "Settings file path")]
    settings: Option<PathBuf>,

    #[arg(long, help = "Print the commands that would run without executing them")]
    dry_run: bool,

    #[arg(long, help = "Show registered apps and exit")]
    list: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn, help = "Diagnostic log level")]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_tracing(args.log_level) {
        eprintln!("Warning: {}", e);
    }

    // Registry is read once here and passed down by reference
    let registry_path = match args.registry.clone() {
        Some(path) => path,
        None => exit_with(AppRegistry::default_path()),
    };
    let registry = exit_with(AppRegistry::load(&registry_path));

    if args.list {
        if registry.is_empty() {
            ui::display_error(&format!("No apps registered in {}", registry_path.display()));
            std::process::exit(1);
        }
        ui::display_available_apps(&registry.names());
        return Ok(());
    }

    let (platform, environment, app_name) =
        match (args.platform, args.environment, args.app_name) {
            (Some(platform), Some(environment), Some(app_name)) => {
                (platform, environment, app_name)
            }
            _ => {
                ui::display_usage();
                std::process::exit(1);
            }
        };

    let settings = exit_with(config::load_settings(args.settings.as_deref()));

    let release_args = ReleaseArgs {
        platform,
        environment,
        app_name,
        bump_kind: args.bump_kind,
        custom_tag: args.tagname,
        dry_run: args.dry_run,
    };

    let runner = ShellRunner::new();
    match run_release_workflow(&release_args, &registry, &settings, &runner) {
        Ok(WorkflowResult::Released(outcome)) => {
            ui::display_released(outcome.tag.name(), &release_args.app_name);
            Ok(())
        }
        Ok(WorkflowResult::Planned(_)) => {
            ui::display_success("Dry run finished; nothing was changed.");
            Ok(())
        }
        Err(e) => {
            ui::display_failure(&e);
            std::process::exit(1);
        }
    }
}

/// Report a startup error and exit 1
fn exit_with<T>(result: std::result::Result<T, ReleaseError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
