use super::standard::LanguageStandard;
use crate::invocation::InvocationRecord;
use std::collections::HashMap;
use std::path::Path;

/// Target name used when no link step named an output.
pub const DEFAULT_TARGET_NAME: &str = "project";

/// Library token added to the link line when `-pthread` was seen.
pub const THREADS_LIBRARY: &str = "pthread";

/// A source path that was dropped because another source with the same
/// file name was already collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedSource {
    pub kept: String,
    pub dropped: String,
}

/// Everything needed to declare one CMake executable target.
///
/// List fields are deduplicated with first-occurrence order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDescription {
    pub target_name: String,
    /// Full source paths, unique by file name.
    pub sources: Vec<String>,
    /// Object file -> source that produced it, from compile steps.
    pub object_to_source: HashMap<String, String>,
    pub include_dirs: Vec<String>,
    pub defines: Vec<String>,
    /// Warning names without the `-W` prefix.
    pub warnings: Vec<String>,
    pub other_flags: Vec<String>,
    pub libraries: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub linker_flags: Vec<String>,
    pub language_standard: Option<LanguageStandard>,
    pub optimization_level: Option<String>,
    pub debug: bool,
    pub position_independent_code: bool,
    pub threading_requested: bool,
    pub shadowed_sources: Vec<ShadowedSource>,
    pub compile_steps: usize,
    pub link_steps: usize,
}

/// Fold an ordered list of invocations into one target.
///
/// Compile steps (`-c`) contribute sources, preprocessor and code-gen
/// settings; link steps contribute the target name and link settings and
/// pull in sources through the object files they consume.
pub fn synthesize(records: &[InvocationRecord]) -> TargetDescription {
    let (compile, link): (Vec<&InvocationRecord>, Vec<&InvocationRecord>) =
        records.iter().partition(|r| r.compile_only);

    let mut target = TargetDescription {
        compile_steps: compile.len(),
        link_steps: link.len(),
        ..Default::default()
    };
    let mut raw_standard: Option<&str> = None;
    let mut target_name: Option<&str> = None;

    for record in &compile {
        target.fold_compile(record);
        if raw_standard.is_none() {
            raw_standard = record.language_standard.as_deref().filter(|s| !s.is_empty());
        }
    }

    for record in &link {
        if target_name.is_none() {
            target_name = record.output.as_deref().filter(|o| !o.is_empty());
        }
        target.fold_link(record, compile.is_empty());
    }

    target.target_name = target_name.unwrap_or(DEFAULT_TARGET_NAME).to_string();
    target.language_standard = raw_standard.map(LanguageStandard::resolve);
    target
}

impl TargetDescription {
    fn fold_compile(&mut self, record: &InvocationRecord) {
        for src in &record.source_files {
            self.add_source(src);
        }
        if let Some(output) = record.output.as_deref().filter(|o| !o.is_empty())
            && let Some(first) = record.source_files.first()
        {
            self.object_to_source
                .insert(output.to_string(), first.clone());
        }

        merge_unique(&mut self.include_dirs, &record.include_dirs);
        merge_unique(&mut self.defines, &record.defines);
        merge_unique(&mut self.warnings, &record.warnings);
        merge_unique(&mut self.other_flags, &record.other_flags);

        if self.optimization_level.is_none() {
            self.optimization_level = record.optimization_level.clone();
        }
        self.debug |= record.debug;
        self.position_independent_code |= record.position_independent_code;
        self.threading_requested |= record.threading_requested;
    }

    fn fold_link(&mut self, record: &InvocationRecord, no_compile_steps: bool) {
        merge_unique(&mut self.libraries, &record.libraries);
        merge_unique(&mut self.lib_dirs, &record.lib_dirs);
        merge_unique(&mut self.linker_flags, &record.linker_flags);
        self.threading_requested |= record.threading_requested;

        // Single-step `cc main.c -o app` builds.
        if no_compile_steps {
            for src in &record.source_files {
                self.add_source(src);
            }
        }

        for obj in &record.object_files {
            if let Some(src) = self.object_to_source.get(obj).cloned() {
                self.add_source(&src);
            }
        }
    }

    /// Add a source unless one with the same file name is already present.
    fn add_source(&mut self, path: &str) {
        let name = basename(path);
        match self.sources.iter().find(|s| basename(s) == name) {
            Some(existing) if existing == path => {}
            Some(existing) => {
                let shadow = ShadowedSource {
                    kept: existing.clone(),
                    dropped: path.to_string(),
                };
                if !self.shadowed_sources.contains(&shadow) {
                    self.shadowed_sources.push(shadow);
                }
            }
            None => self.sources.push(path.to_string()),
        }
    }

    /// Options for `target_compile_options`, in their fixed order:
    /// warnings, `-g`, `-O<level>`, `-fPIC`, then every other flag.
    pub fn compile_options(&self) -> Vec<String> {
        let mut opts: Vec<String> = self.warnings.iter().map(|w| format!("-W{}", w)).collect();
        if self.debug {
            opts.push("-g".to_string());
        }
        if let Some(level) = &self.optimization_level {
            opts.push(format!("-O{}", level));
        }
        if self.position_independent_code {
            opts.push("-fPIC".to_string());
        }
        opts.extend(self.other_flags.iter().cloned());
        opts
    }

    /// Libraries for `target_link_libraries`, including the threads library
    /// when `-pthread` was requested anywhere.
    pub fn link_libraries(&self) -> Vec<String> {
        let mut libs = self.libraries.clone();
        if self.threading_requested && !libs.iter().any(|l| l == THREADS_LIBRARY) {
            libs.push(THREADS_LIBRARY.to_string());
        }
        libs
    }

    /// Source file names as they appear in `add_executable`.
    pub fn source_basenames(&self) -> Vec<&str> {
        self.sources.iter().map(|s| basename(s)).collect()
    }
}

fn merge_unique(into: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !into.contains(value) {
            into.push(value.clone());
        }
    }
}

/// File name component of `path`, or the whole string if it has none.
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}
