use anyhow::{Context, Result};
use std::env;
use swig_runner_core::{
    Config, LogSink, ResolvedTool, SourceRoots, SwigGenerator, ToolTable, TracingSink,
    command::CommandBuilder,
};
use tracing::{debug, info};

use crate::cli::GenerateArgs;
use crate::display::print_command_breakdown;
use crate::utils::list_generated_sources;

pub fn generate_command(args: &GenerateArgs) -> Result<()> {
    let project_dir = match &args.project_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_dir = project_dir
        .canonicalize()
        .with_context(|| format!("Project directory {} does not exist", project_dir.display()))?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::discover(&project_dir)?,
    };
    config.merge(args.to_config());
    debug!("Effective config: {:?}", config);

    let settings = config.resolve(&project_dir)?;
    let repository = config.repository(&project_dir)?;
    let sink = TracingSink;

    if args.dry_run {
        settings.validate()?;
        let tools = ToolTable::default();
        let entry = tools.lookup(&settings.platform)?;
        let nar_dir = tools.nar_dir(&repository, entry)?;
        let tool = ResolvedTool::in_nar_dir(&nar_dir, entry);
        let layout = settings.layout();

        let command = CommandBuilder::new(&settings, &layout, &tool)
            .verbose(sink.is_debug_enabled())
            .build()?;
        println!("{}", command.to_shell_command());
        print_command_breakdown(&command);
        return Ok(());
    }

    let mut roots = SourceRoots::new();
    let generated = SwigGenerator::new(&repository, &sink).generate(&settings, &mut roots)?;

    let sources = list_generated_sources(&generated.layout.java_dir);
    info!(
        "Generated {} Java sources in {}",
        sources.len(),
        generated.layout.java_dir.display()
    );
    for root in roots.roots() {
        println!("{}", root.display());
    }

    Ok(())
}
