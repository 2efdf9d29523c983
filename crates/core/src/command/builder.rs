//! Builds the SWIG argument list from resolved settings
//!
//! Argument order:
//! `-v`, `-java`, `-c++`, `-w<id>`..., `-o <file>`, `-package <name>`,
//! `-outdir <dir>`, user `-I`..., default `-I`s, tool `-I`s, source file.

use super::SwigCommand;
use crate::{
    config::{settings::DEFAULT_INCLUDE_DIRECTORY, GenerateSettings, OutputLayout},
    error::{Error, Result},
    tool::ResolvedTool,
};
use std::path::{Path, MAIN_SEPARATOR};

pub struct CommandBuilder<'a> {
    settings: &'a GenerateSettings,
    layout: &'a OutputLayout,
    tool: &'a ResolvedTool,
    verbose: bool,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(
        settings: &'a GenerateSettings,
        layout: &'a OutputLayout,
        tool: &'a ResolvedTool,
    ) -> Self {
        Self {
            settings,
            layout,
            tool,
            verbose: false,
        }
    }

    /// Pass `-v` to SWIG
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(&self) -> Result<SwigCommand> {
        let settings = self.settings;
        let base_name = Path::new(&settings.source)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                Error::ConfigError(format!("invalid source file name: {:?}", settings.source))
            })?;

        let mut args = Vec::new();

        if self.verbose {
            args.push("-v".to_string());
        }

        args.push("-java".to_string());
        if settings.cpp {
            args.push("-c++".to_string());
        }

        for warning in &settings.no_warn {
            args.push(format!("-w{warning}"));
        }

        let extension = if settings.cpp { "cxx" } else { "c" };
        args.push("-o".to_string());
        args.push(
            self.layout
                .native_dir
                .join(format!("{base_name}.{extension}"))
                .display()
                .to_string(),
        );

        if let Some(package) = &settings.package_name {
            args.push("-package".to_string());
            args.push(package.clone());
        }

        args.push("-outdir".to_string());
        args.push(self.layout.java_dir.display().to_string());

        for include in &settings.include_paths {
            args.push(format!("-I{}", include.display()));
        }

        let source_dir = with_trailing_separator(&settings.source_directory);
        args.push(format!(
            "-I{}",
            settings.project_dir.join(DEFAULT_INCLUDE_DIRECTORY).display()
        ));
        args.push(format!("-I{source_dir}"));

        args.push(format!("-I{}", self.tool.java_include_dir.display()));
        args.push(format!("-I{}", self.tool.include_dir.display()));

        args.push(format!("{source_dir}{}", settings.source));

        Ok(SwigCommand::new(&self.tool.executable, args).with_working_dir(&settings.project_dir))
    }
}

/// Directory path ending in exactly one separator.
pub fn with_trailing_separator(dir: &Path) -> String {
    let dir = dir.display().to_string();
    if dir.ends_with('/') || dir.ends_with(MAIN_SEPARATOR) {
        dir
    } else {
        format!("{dir}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolEntry;
    use std::path::PathBuf;

    const ENTRY: ToolEntry = ToolEntry::new("amd64", "Linux", "g++", "swig");

    fn tool() -> ResolvedTool {
        ResolvedTool::in_nar_dir(Path::new("/repo/nar"), &ENTRY)
    }

    fn build(settings: &GenerateSettings) -> SwigCommand {
        let layout = settings.layout();
        CommandBuilder::new(settings, &layout, &tool()).build().unwrap()
    }

    fn count(command: &SwigCommand, pred: impl Fn(&str) -> bool) -> usize {
        command.args.iter().filter(|arg| pred(arg)).count()
    }

    #[cfg(unix)]
    #[test]
    fn test_full_command_line() {
        let mut settings = GenerateSettings::new("/work", "example.swg");
        settings.cpp = true;
        settings.no_warn = vec!["302".to_string(), "401".to_string()];
        settings.package_name = Some("org.freehep.jni".to_string());
        settings.include_paths = vec![PathBuf::from("/usr/include/jdk")];

        let command = build(&settings);
        insta::assert_snapshot!(command.to_shell_command(), @"/repo/nar/bin/amd64-Linux-g++/swig -java -c++ -w302 -w401 -o /work/target/swig/c++/example.cxx -package org.freehep.jni -outdir /work/target/swig/java -I/usr/include/jdk -I/work/src/main/include -I/work/src/main/swig/ -I/repo/nar/include/java -I/repo/nar/include /work/src/main/swig/example.swg");
        assert_eq!(command.working_dir, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_verbose_flag_comes_first() {
        let settings = GenerateSettings::new("/work", "example.swg");
        let layout = settings.layout();
        let tool = tool();

        let quiet = CommandBuilder::new(&settings, &layout, &tool).build().unwrap();
        assert_eq!(quiet.args[0], "-java");
        assert!(!quiet.args.contains(&"-v".to_string()));

        let verbose = CommandBuilder::new(&settings, &layout, &tool)
            .verbose(true)
            .build()
            .unwrap();
        assert_eq!(&verbose.args[..2], ["-v", "-java"]);
    }

    #[test]
    fn test_include_flags_keep_order_and_count() {
        let mut settings = GenerateSettings::new("/work", "example.swg");
        settings.include_paths = vec![
            PathBuf::from("/opt/b"),
            PathBuf::from("/opt/a"),
            PathBuf::from("/opt/c"),
        ];
        let command = build(&settings);

        let includes: Vec<&str> = command
            .args
            .iter()
            .filter(|arg| arg.starts_with("-I"))
            .map(String::as_str)
            .collect();
        assert_eq!(includes.len(), 3 + 2 + 2);
        assert_eq!(&includes[..3], ["-I/opt/b", "-I/opt/a", "-I/opt/c"]);
        assert!(includes[3].ends_with("include"));
        assert!(includes[4].starts_with("-I/work/src/main/swig"));
        assert_eq!(includes[5], format!("-I{}", tool().java_include_dir.display()));
        assert_eq!(includes[6], format!("-I{}", tool().include_dir.display()));
    }

    #[test]
    fn test_no_user_includes_still_has_defaults() {
        let command = build(&GenerateSettings::new("/work", "example.swg"));
        assert_eq!(count(&command, |arg| arg.starts_with("-I")), 4);
    }

    #[test]
    fn test_warning_flags_keep_order() {
        let mut settings = GenerateSettings::new("/work", "example.swg");
        settings.no_warn = vec!["451".to_string(), "302".to_string(), "401".to_string()];
        let command = build(&settings);

        let warnings: Vec<&str> = command
            .args
            .iter()
            .filter(|arg| arg.starts_with("-w"))
            .map(String::as_str)
            .collect();
        assert_eq!(warnings, ["-w451", "-w302", "-w401"]);

        let position = |flag: &str| command.args.iter().position(|arg| arg == flag).unwrap();
        assert!(position("-java") < position("-w451"));
        assert!(position("-w401") < position("-o"));
    }

    #[test]
    fn test_package_flag_only_when_configured() {
        let mut settings = GenerateSettings::new("/work", "example.swg");
        let command = build(&settings);
        assert_eq!(count(&command, |arg| arg == "-package"), 0);

        settings.package_name = Some("com.example".to_string());
        let command = build(&settings);
        assert_eq!(count(&command, |arg| arg == "-package"), 1);
        assert_eq!(command.value_of("-package"), Some("com.example"));

        let position = |flag: &str| command.args.iter().position(|arg| arg == flag).unwrap();
        assert!(position("-o") < position("-package"));
        assert!(position("-package") < position("-outdir"));
    }

    #[test]
    fn test_output_file_extension_follows_cpp_mode() {
        let mut settings = GenerateSettings::new("/work", "foo.iface");
        let layout = OutputLayout {
            native_dir: PathBuf::from("/out"),
            java_dir: PathBuf::from("/out/java"),
        };
        let tool = tool();

        let c = CommandBuilder::new(&settings, &layout, &tool).build().unwrap();
        let output = c.value_of("-o").unwrap();
        assert_eq!(PathBuf::from(output), PathBuf::from("/out/foo.c"));

        settings.cpp = true;
        let cxx = CommandBuilder::new(&settings, &layout, &tool).build().unwrap();
        assert_eq!(PathBuf::from(cxx.value_of("-o").unwrap()), PathBuf::from("/out/foo.cxx"));
        assert_eq!(cxx.value_of("-outdir"), Some(layout.java_dir.display().to_string().as_str()));
    }

    #[test]
    fn test_source_path_has_single_separator() {
        let mut settings = GenerateSettings::new("/work", "example.swg");
        settings.source_directory = PathBuf::from("/work/swig/");
        let command = build(&settings);
        assert_eq!(command.source(), Some("/work/swig/example.swg"));
        assert!(command.args.contains(&"-I/work/swig/".to_string()));

        settings.source_directory = PathBuf::from("/work/swig");
        let command = build(&settings);
        assert_eq!(command.source(), Some("/work/swig/example.swg"));
    }

    #[test]
    fn test_program_is_tool_executable() {
        let command = build(&GenerateSettings::new("/work", "example.swg"));
        assert_eq!(command.program, tool().executable);
    }

    #[test]
    fn test_invalid_source_name_is_config_error() {
        let settings = GenerateSettings::new("/work", "");
        let layout = settings.layout();
        let err = CommandBuilder::new(&settings, &layout, &tool())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_trailing_separator_helper() {
        assert_eq!(with_trailing_separator(Path::new("/a/b")), "/a/b/");
        assert_eq!(with_trailing_separator(Path::new("/a/b/")), "/a/b/");
    }
}
