use crate::{error::Result, log::LogSink, runner::ProcessOutcome};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct SwigCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl SwigCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Value following the first occurrence of `flag`, e.g. `-o` or `-package`.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Interface file passed to SWIG (always the last argument).
    pub fn source(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote(&self.program.display().to_string());
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote(arg));
        }
        cmd
    }

    /// Run the command, forwarding its output to `sink`.
    pub fn execute(&self, sink: &dyn LogSink) -> Result<ProcessOutcome> {
        crate::runner::run_streaming(self, sink)
    }
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(' ') {
        format!("'{arg}'")
    } else {
        arg.to_string()
    }
}
