use super::target::TargetDescription;

/// Default `cmake_minimum_required` version.
pub const DEFAULT_CMAKE_MINIMUM: &str = "3.10";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub cmake_minimum: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cmake_minimum: DEFAULT_CMAKE_MINIMUM.to_string(),
        }
    }
}

/// Render a target as CMakeLists.txt text.
///
/// Statements always come in the same order and empty ones are left out.
/// Sources are written by file name only.
pub fn render(target: &TargetDescription, options: &RenderOptions) -> String {
    let name = &target.target_name;
    let mut lines = vec![
        format!("cmake_minimum_required(VERSION {})", options.cmake_minimum),
        format!("project({})", name),
    ];

    if let Some(std) = &target.language_standard {
        lines.push(format!(
            "set(CMAKE_{}_STANDARD {})",
            std.language.cmake_tag(),
            std.version
        ));
    }

    lines.push(format!(
        "add_executable({} {})",
        name,
        target.source_basenames().join(" ")
    ));

    push_private(&mut lines, "target_include_directories", name, &target.include_dirs);
    push_private(&mut lines, "target_compile_definitions", name, &target.defines);
    push_private(&mut lines, "target_link_libraries", name, &target.link_libraries());
    push_private(&mut lines, "target_link_directories", name, &target.lib_dirs);
    push_private(&mut lines, "target_compile_options", name, &target.compile_options());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_private(lines: &mut Vec<String>, command: &str, target: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{}({} PRIVATE {})", command, target, items.join(" ")));
}
