//! Compiler stand-in used by the `cmakegen-cc` and `cmakegen-cxx` binaries.
//!
//! Put the proxies first on `PATH` (or point `CC`/`CXX` at them) and run the
//! build as usual. Each call is recorded and then handed to the real compiler
//! with the original arguments, so the build itself is unaffected.

use crate::config::Settings;
use crate::invocation::InvocationRecord;
use crate::parser::parse_args;
use crate::store::InvocationLog;
use colored::*;
use std::ffi::OsString;
use std::process::{Command, ExitStatus};

/// Exit code when the real compiler cannot be started at all.
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Which real compiler a proxy forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    C,
    Cxx,
}

impl Driver {
    pub fn compiler<'a>(&self, settings: &'a Settings) -> &'a str {
        match self {
            Driver::C => &settings.cc,
            Driver::Cxx => &settings.cxx,
        }
    }
}

/// Entry point for the proxy binaries: reads settings and arguments from the
/// process and returns the exit code to terminate with.
pub fn main(driver: Driver) -> i32 {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} cmakegen: {:#}, using defaults", "⚠".yellow(), e);
            Settings::default()
        }
    };
    run(driver, &args, &settings)
}

/// Record `args` and forward them unchanged to the real compiler.
///
/// Arguments that are not valid UTF-8 are recorded lossily but forwarded
/// byte for byte.
pub fn run(driver: Driver, args: &[OsString], settings: &Settings) -> i32 {
    let view: Vec<String> = args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let record = parse_args(&view);
    let compiler = driver.compiler(settings);

    if settings.verbose {
        eprintln!("{}", describe(compiler, &record).dimmed());
    }

    // A broken log must never break the build.
    let log = InvocationLog::new(&settings.log_path);
    if let Err(e) = log.append(&record) {
        eprintln!(
            "{} cmakegen: could not record invocation in {}: {}",
            "⚠".yellow(),
            log.path().display(),
            e
        );
    }

    match Command::new(compiler).args(args).status() {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!(
                "{} cmakegen: failed to run '{}': {}",
                "x".red(),
                compiler,
                e
            );
            EXIT_SPAWN_FAILED
        }
    }
}

fn describe(compiler: &str, record: &InvocationRecord) -> String {
    let subject = if record.compile_only {
        record.source_files.join(" ")
    } else {
        record.output.clone().unwrap_or_else(|| "a.out".to_string())
    };
    format!("[cmakegen] {} {} -> {}", record.kind(), subject, compiler)
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir, cc: &str) -> Settings {
        Settings {
            log_path: dir.path().join("log.jsonl"),
            cc: cc.to_string(),
            ..Settings::default()
        }
    }

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(|s| OsString::from(*s)).collect()
    }

    #[test]
    fn test_driver_selects_compiler() {
        let s = Settings::default();
        assert_eq!(Driver::C.compiler(&s), "cc");
        assert_eq!(Driver::Cxx.compiler(&s), "c++");
    }

    #[test]
    fn test_describe() {
        let record = parse_args(&["-c", "main.c", "-o", "main.o"]);
        assert_eq!(describe("gcc", &record), "[cmakegen] compile main.c -> gcc");
        let record = parse_args(&["main.o", "-o", "app"]);
        assert_eq!(describe("gcc", &record), "[cmakegen] link app -> gcc");
    }

    #[test]
    fn test_missing_compiler_still_logs() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, "cmakegen-test-no-such-compiler");
        let code = run(Driver::C, &args(&["-c", "main.c"]), &settings);
        assert_eq!(code, EXIT_SPAWN_FAILED);

        let records = InvocationLog::new(&settings.log_path).read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_files, vec!["main.c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_recorded_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, "true");
        let source = OsString::from_vec(b"m\xffain.c".to_vec());
        let argv = vec![OsString::from("-c"), source, OsString::from("-o"), OsString::from("main.o")];
        assert_eq!(run(Driver::C, &argv, &settings), 0);

        let records = InvocationLog::new(&settings.log_path).read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_files, vec!["m\u{fffd}ain.c"]);
        assert_eq!(records[0].output.as_deref(), Some("main.o"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_propagated() {
        let dir = TempDir::new().unwrap();
        // `false` ignores its arguments and exits 1.
        let settings = settings_in(&dir, "false");
        assert_eq!(run(Driver::C, &args(&["-c", "x.c"]), &settings), 1);

        let settings = settings_in(&dir, "true");
        assert_eq!(run(Driver::C, &args(&["x.o", "-o", "app"]), &settings), 0);

        let records = InvocationLog::new(&settings.log_path).read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].compile_only);
        assert_eq!(records[1].output.as_deref(), Some("app"));
    }
}
