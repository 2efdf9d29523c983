//! Main entry point that sequences a SWIG run
//!
//! validate → create output directories → register the Java source root →
//! resolve the tool → build the command line → run → check the exit code.
//! Any failure aborts the whole run.

use crate::{
    command::{CommandBuilder, SwigCommand},
    config::{GenerateSettings, OutputLayout},
    error::{Error, Result},
    log::LogSink,
    project::BuildProject,
    runner::ProcessOutcome,
    tool::{ArtifactResolver, ToolTable},
};
use tracing::debug;

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub command: SwigCommand,
    pub layout: OutputLayout,
    pub outcome: ProcessOutcome,
}

pub struct SwigGenerator<'a> {
    tools: ToolTable,
    resolver: &'a dyn ArtifactResolver,
    sink: &'a dyn LogSink,
}

impl<'a> SwigGenerator<'a> {
    pub fn new(resolver: &'a dyn ArtifactResolver, sink: &'a dyn LogSink) -> Self {
        Self {
            tools: ToolTable::default(),
            resolver,
            sink,
        }
    }

    pub fn with_tools(mut self, tools: ToolTable) -> Self {
        self.tools = tools;
        self
    }

    /// Validate settings, create the output directories and register the Java
    /// output as a compile source root.
    pub fn prepare(
        &self,
        settings: &GenerateSettings,
        project: &mut dyn BuildProject,
    ) -> Result<OutputLayout> {
        settings.validate()?;

        let layout = settings.layout();
        layout.create()?;
        project.add_compile_source_root(&layout.java_dir);
        debug!("Registered compile source root {:?}", layout.java_dir);

        Ok(layout)
    }

    /// Resolve the tool for the configured platform and build its command line.
    pub fn command(&self, settings: &GenerateSettings, layout: &OutputLayout) -> Result<SwigCommand> {
        let tool = self.tools.resolve(self.resolver, &settings.platform)?;
        CommandBuilder::new(settings, layout, &tool)
            .verbose(self.sink.is_debug_enabled())
            .build()
    }

    pub fn generate(
        &self,
        settings: &GenerateSettings,
        project: &mut dyn BuildProject,
    ) -> Result<Generated> {
        let layout = self.prepare(settings, project)?;
        let command = self.command(settings, &layout)?;

        self.sink
            .info(&format!("Running SWIG compiler on {} ...", settings.source));
        self.sink.info(&command.to_shell_command());

        let outcome = command.execute(self.sink)?;
        if !outcome.success() {
            return Err(Error::ToolFailed(outcome.exit_code));
        }

        Ok(Generated {
            command,
            layout,
            outcome,
        })
    }
}
