//! A single compiler or linker call, as captured by the proxy.
//!
//! Records are a faithful transcription of one argument list. Nothing is
//! normalized or deduplicated here; that happens in [`crate::synth`].

use serde::{Deserialize, Serialize};

/// One compiler/linker invocation.
///
/// Serialized as one JSON object per log line. Missing keys decode to their
/// empty defaults so partial records written by hand still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationRecord {
    /// Positional source files (`.c`, `.cpp`, `.cc`, `.cxx`, `.C`), full paths.
    pub source_files: Vec<String>,
    /// Positional object files (`.o`).
    pub object_files: Vec<String>,
    /// Value of `-o`.
    pub output: Option<String>,
    /// Raw `-std=` value, e.g. `c++17` or `gnu11`.
    #[serde(rename = "std")]
    pub language_standard: Option<String>,
    pub include_dirs: Vec<String>,
    pub defines: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub libraries: Vec<String>,
    /// One of `0`, `1`, `2`, `3`, `s`, `g`.
    #[serde(rename = "optimization")]
    pub optimization_level: Option<String>,
    /// `-W<name>` flags with the `-W` stripped.
    pub warnings: Vec<String>,
    pub debug: bool,
    #[serde(rename = "pic")]
    pub position_independent_code: bool,
    #[serde(rename = "pthread")]
    pub threading_requested: bool,
    /// `-c` was present: this call produced an object, not a binary.
    pub compile_only: bool,
    /// `-Wl,...` flags, verbatim.
    pub linker_flags: Vec<String>,
    /// Every other `-` flag, verbatim and in order.
    pub other_flags: Vec<String>,
}

impl InvocationRecord {
    /// True for link (or fused compile+link) steps.
    pub fn is_link(&self) -> bool {
        !self.compile_only
    }

    /// Short label used by `cmakegen show` and the proxy's verbose line.
    pub fn kind(&self) -> &'static str {
        if self.compile_only { "compile" } else { "link" }
    }
}
