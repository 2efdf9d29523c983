use swig_runner_core::SwigCommand;

/// Parsed view of a SWIG argument list.
#[derive(Debug, Default, PartialEq)]
pub struct Breakdown {
    pub verbose: bool,
    pub cpp: bool,
    pub warnings: Vec<String>,
    pub output: Option<String>,
    pub package: Option<String>,
    pub outdir: Option<String>,
    pub includes: Vec<String>,
    pub source: Option<String>,
}

pub fn breakdown(command: &SwigCommand) -> Breakdown {
    let mut result = Breakdown::default();
    let args = &command.args;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        if arg == "-v" {
            result.verbose = true;
        } else if arg == "-c++" {
            result.cpp = true;
        } else if arg == "-o" && i + 1 < args.len() {
            result.output = Some(args[i + 1].clone());
            i += 1; // Skip the value
        } else if arg == "-package" && i + 1 < args.len() {
            result.package = Some(args[i + 1].clone());
            i += 1;
        } else if arg == "-outdir" && i + 1 < args.len() {
            result.outdir = Some(args[i + 1].clone());
            i += 1;
        } else if let Some(include) = arg.strip_prefix("-I") {
            result.includes.push(include.to_string());
        } else if let Some(warning) = arg.strip_prefix("-w") {
            result.warnings.push(warning.to_string());
        } else if !arg.starts_with('-') && i + 1 == args.len() {
            result.source = Some(arg.clone());
        }

        i += 1;
    }

    result
}

pub fn print_command_breakdown(command: &SwigCommand) {
    let parts = breakdown(command);

    println!("   🔧 Command breakdown:");
    println!("      • command: {}", command.program.display());
    println!("      • mode: {}", if parts.cpp { "java (c++)" } else { "java (c)" });

    if parts.verbose {
        println!("      • verbose: true");
    }
    if !parts.warnings.is_empty() {
        println!("      • noWarn: {:?}", parts.warnings);
    }
    if let Some(output) = &parts.output {
        println!("      • output: {}", output);
    }
    if let Some(package) = &parts.package {
        println!("      • package: {}", package);
    }
    if let Some(outdir) = &parts.outdir {
        println!("      • outdir: {}", outdir);
    }
    for include in &parts.includes {
        println!("      • include: {}", include);
    }
    if let Some(source) = &parts.source {
        println!("      • source: {}", source);
    }
    if let Some(dir) = &command.working_dir {
        println!("      • workingDir: {}", dir.display());
    }
}
