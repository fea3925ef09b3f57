//! GCC/Clang-style argument parsing.
//!
//! [`parse_args`] turns the argument list the proxy received (without the
//! program name) into an [`InvocationRecord`]. It never fails: flags it does
//! not understand land in `other_flags` untouched.

use crate::invocation::InvocationRecord;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions treated as translation units. Matching is case sensitive
/// (`.C` is C++, `.c` is C).
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cpp", "cc", "cxx", "C"];

/// Extension of object files passed to a link step.
pub const OBJECT_EXTENSION: &str = "o";

// Only the exact single-level forms; `-Ofast`, `-Oz` and bare `-O` stay opaque.
static OPTIMIZATION_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-O[0-3sg]$").expect("optimization pattern is valid"));

/// Parse one compiler/linker argument list.
///
/// Flags taking a value accept both the joined (`-I/usr/include`) and the
/// separate (`-I /usr/include`) form. A separate-form flag at the very end of
/// the list is recorded without a value.
pub fn parse_args<S: AsRef<str>>(argv: &[S]) -> InvocationRecord {
    let mut record = InvocationRecord::default();
    let mut tokens = argv.iter().map(AsRef::<str>::as_ref);

    while let Some(arg) = tokens.next() {
        if arg == "-c" {
            record.compile_only = true;
        } else if arg == "-o" {
            if let Some(value) = tokens.next() {
                record.output = Some(value.to_string());
            }
        } else if let Some(std) = arg.strip_prefix("-std=") {
            record.language_standard = Some(std.to_string());
        } else if let Some(value) = flag_value(arg, "-I", &mut tokens) {
            record.include_dirs.extend(value);
        } else if let Some(value) = flag_value(arg, "-D", &mut tokens) {
            record.defines.extend(value);
        } else if let Some(value) = flag_value(arg, "-L", &mut tokens) {
            record.lib_dirs.extend(value);
        } else if let Some(value) = flag_value(arg, "-l", &mut tokens) {
            record.libraries.extend(value);
        } else if OPTIMIZATION_FLAG.is_match(arg) {
            record.optimization_level = Some(arg[2..].to_string());
        } else if arg.starts_with("-Wl,") {
            // Must precede the generic -W check.
            record.linker_flags.push(arg.to_string());
        } else if let Some(warning) = arg.strip_prefix("-W") {
            record.warnings.push(warning.to_string());
        } else if arg == "-g" {
            record.debug = true;
        } else if arg == "-fPIC" || arg == "-fpic" {
            record.position_independent_code = true;
        } else if arg == "-pthread" {
            record.threading_requested = true;
        } else if !arg.starts_with('-') {
            classify_positional(arg, &mut record);
        } else {
            record.other_flags.push(arg.to_string());
        }
    }

    record
}

/// Match `flag` in joined or separate form.
///
/// Returns `None` if `arg` is not this flag, `Some(None)` if it is the
/// separate form with nothing left to consume, and `Some(Some(value))`
/// otherwise.
fn flag_value<'a>(
    arg: &str,
    flag: &str,
    rest: &mut impl Iterator<Item = &'a str>,
) -> Option<Option<String>> {
    if arg == flag {
        Some(rest.next().map(str::to_string))
    } else {
        arg.strip_prefix(flag).map(|joined| Some(joined.to_string()))
    }
}

fn classify_positional(arg: &str, record: &mut InvocationRecord) {
    let Some(ext) = Path::new(arg).extension().and_then(|e| e.to_str()) else {
        return;
    };
    if SOURCE_EXTENSIONS.contains(&ext) {
        record.source_files.push(arg.to_string());
    } else if ext == OBJECT_EXTENSION {
        record.object_files.push(arg.to_string());
    }
    // Anything else (archives, linker scripts, ...) is dropped.
}
