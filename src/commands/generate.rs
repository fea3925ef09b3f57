//! `cmakegen generate`
//!
//! Reads the invocation log, folds it into one target and writes the
//! CMakeLists.txt text to stdout or a file. Diagnostics go to stderr so the
//! stdout form can be redirected straight into a file.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::store::InvocationLog;
use crate::synth::{self, RenderOptions, TargetDescription};

#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub log: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub fn handle_generate(options: &GenerateOptions) -> Result<()> {
    let settings = Settings::load()?;
    let log = super::open_log(options.log.as_deref(), &settings);
    let (target, content) = generate_from_log(&log, &settings.render)?;

    for shadow in &target.shadowed_sources {
        eprintln!(
            "   {} Skipped '{}': same file name as '{}'",
            "⚠".yellow(),
            shadow.dropped,
            shadow.kept
        );
    }
    if options.verbose {
        print_summary(&target);
    }

    match &options.output {
        Some(path) => {
            write_output(path, &content)?;
            println!("{} CMakeLists.txt written to {}", "✓".green(), path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Read `log` and render it. An empty or missing log is a user error.
pub fn generate_from_log(
    log: &InvocationLog,
    options: &RenderOptions,
) -> Result<(TargetDescription, String)> {
    let records = log
        .read_all()
        .with_context(|| format!("Failed to read invocation log {}", log.path().display()))?;

    if records.is_empty() {
        return Err(anyhow::anyhow!(
            "No invocations found in log {}.\n\n\
            💡 Tip: Run a build with the proxy compilers (cmakegen-cc / cmakegen-cxx) first.",
            log.path().display()
        ));
    }

    let target = synth::synthesize(&records);
    let content = synth::render(&target, options);
    Ok((target, content))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn print_summary(target: &TargetDescription) {
    eprintln!(
        "{} Target '{}' from {} compile and {} link step(s)",
        "ℹ".blue(),
        target.target_name.bold(),
        target.compile_steps,
        target.link_steps
    );
    eprintln!("   sources:   {}", target.sources.len());
    eprintln!("   includes:  {}", target.include_dirs.len());
    eprintln!("   libraries: {}", target.link_libraries().len());
    if let Some(std) = &target.language_standard {
        eprintln!("   standard:  {} {}", std.language, std.version);
    }
    if !target.linker_flags.is_empty() {
        eprintln!("   linker flags (not rendered): {}", target.linker_flags.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_args;
    use tempfile::TempDir;

    #[test]
    fn test_empty_log_is_error() {
        let dir = TempDir::new().unwrap();
        let log = InvocationLog::new(dir.path().join("missing.jsonl"));
        let err = generate_from_log(&log, &RenderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("No invocations found"));
    }

    #[test]
    fn test_generate_from_log() {
        let dir = TempDir::new().unwrap();
        let log = InvocationLog::new(dir.path().join("log.jsonl"));
        log.append(&parse_args(&["-std=c++17", "-c", "-o", "main.o", "main.cpp"])).unwrap();
        log.append(&parse_args(&["main.o", "-o", "myapp"])).unwrap();

        let (target, content) = generate_from_log(&log, &RenderOptions::default()).unwrap();
        assert_eq!(target.target_name, "myapp");
        assert!(content.contains("add_executable(myapp main.cpp)"));
        assert!(content.contains("set(CMAKE_CXX_STANDARD 17)"));
    }

    #[test]
    fn test_malformed_log_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        fs::write(&path, "not json\n").unwrap();
        let err = generate_from_log(&InvocationLog::new(&path), &RenderOptions::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("CMakeLists.txt");
        write_output(&path, "project(x)\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "project(x)\n");
    }
}
