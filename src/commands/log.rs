//! `cmakegen clear` and `cmakegen show`

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::config::Settings;
use crate::invocation::InvocationRecord;
use crate::ui;

/// Empty the log. Safe to run when there is no log yet.
pub fn handle_clear(log_path: Option<&Path>) -> Result<()> {
    let settings = Settings::load()?;
    let log = super::open_log(log_path, &settings);
    log.clear()
        .with_context(|| format!("Failed to clear {}", log.path().display()))?;
    println!("{} Log cleared.", "✓".green());
    Ok(())
}

/// Print one table row per recorded invocation.
pub fn handle_show(log_path: Option<&Path>) -> Result<()> {
    let settings = Settings::load()?;
    let log = super::open_log(log_path, &settings);
    let records = log
        .read_all()
        .with_context(|| format!("Failed to read invocation log {}", log.path().display()))?;

    if records.is_empty() {
        println!("{} No invocations recorded in {}", "ℹ".blue(), log.path().display());
        return Ok(());
    }

    let mut table = ui::Table::new(&["#", "Kind", "Output", "Inputs", "Std"]);
    for (idx, record) in records.iter().enumerate() {
        table.add_row(row_for(idx + 1, record));
    }
    table.print();
    println!(
        "{} {} invocation(s) in {}",
        "ℹ".blue(),
        records.len(),
        log.path().display()
    );
    Ok(())
}

fn row_for(index: usize, record: &InvocationRecord) -> Vec<String> {
    let kind = if record.is_link() {
        record.kind().magenta().to_string()
    } else {
        record.kind().cyan().to_string()
    };
    let inputs: Vec<&str> = record
        .source_files
        .iter()
        .chain(record.object_files.iter())
        .map(String::as_str)
        .collect();
    vec![
        index.to_string(),
        kind,
        record.output.clone().unwrap_or_else(|| "-".to_string()),
        inputs.join(" "),
        record
            .language_standard
            .clone()
            .unwrap_or_else(|| "-".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_args;
    use console::strip_ansi_codes;

    fn plain_row(index: usize, record: &InvocationRecord) -> Vec<String> {
        row_for(index, record)
            .iter()
            .map(|cell| strip_ansi_codes(cell).into_owned())
            .collect()
    }

    #[test]
    fn test_row_for_link() {
        let record = parse_args(&["a.o", "b.o", "-o", "app"]);
        let row = plain_row(2, &record);
        assert_eq!(row, vec!["2", "link", "app", "a.o b.o", "-"]);
    }

    #[test]
    fn test_row_for_compile() {
        let record = parse_args(&["-std=c11", "-c", "main.c"]);
        let row = plain_row(1, &record);
        assert_eq!(row, vec!["1", "compile", "-", "main.c", "c11"]);
    }
}
