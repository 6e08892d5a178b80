use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{LevelFilter, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::EPOCH;
use crate::error::PlanError;

pub mod cli;
pub mod output;

/// Reads and parses any JSON file (briefings, normalized layouts, configs)
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("could not parse {}", path.display()))
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<(), PlanError> {
    json_to_file(json, path)?;
    info!("[IO] json written to file://{}", canonical(path));
    Ok(())
}

pub fn write_svg(svg: &str, path: &Path) -> Result<(), PlanError> {
    svg_to_file(svg, path)?;
    info!("[IO] svg written to file://{}", canonical(path));
    Ok(())
}

/// Writes the JSON report and the SVG of a plan, or neither of them.
///
/// Both are written under a staging name next to their destination first and only moved into place
/// once both succeeded. On failure, whatever was already written is removed again.
pub fn write_plan(
    json: &impl Serialize,
    svg: &str,
    json_path: &Path,
    svg_path: &Path,
) -> Result<(), PlanError> {
    let (json_staged, svg_staged) = (staging_path(json_path), staging_path(svg_path));

    let staged = json_to_file(json, &json_staged).and_then(|_| svg_to_file(svg, &svg_staged));
    if let Err(err) = staged {
        remove_all(&[json_staged.as_path(), svg_staged.as_path()]);
        return Err(err);
    }

    if let Err(err) = fs::rename(&json_staged, json_path) {
        remove_all(&[json_staged.as_path(), svg_staged.as_path()]);
        return Err(persist_error(json_path, err));
    }
    if let Err(err) = fs::rename(&svg_staged, svg_path) {
        remove_all(&[json_path, svg_staged.as_path()]);
        return Err(persist_error(svg_path, err));
    }

    info!(
        "[IO] plan written to file://{} and file://{}",
        canonical(json_path),
        canonical(svg_path)
    );
    Ok(())
}

fn json_to_file(json: &impl Serialize, path: &Path) -> Result<(), PlanError> {
    let file = File::create(path).map_err(|e| persist_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, json).map_err(|e| persist_error(path, e))?;
    writer.flush().map_err(|e| persist_error(path, e))
}

fn svg_to_file(svg: &str, path: &Path) -> Result<(), PlanError> {
    fs::write(path, svg).map_err(|e| persist_error(path, e))
}

fn persist_error(path: &Path, err: impl Display) -> PlanError {
    PlanError::Persist {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// `plan_x.svg` is staged as `plan_x.svg.partial`
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".partial");
    PathBuf::from(staged)
}

fn remove_all(paths: &[&Path]) {
    for path in paths.iter().filter(|path| path.exists()) {
        if let Err(err) = fs::remove_file(path) {
            warn!("[IO] could not clean up {}: {err}", path.display());
        }
    }
}

fn canonical(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        // Add blanket level filter -
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("[EPOCH]: {}", jiff::Timestamp::now());
    Ok(())
}
