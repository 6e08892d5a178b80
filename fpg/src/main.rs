use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use estande::io::ext_repr::{ExtBriefing, ExtNormalizedLayout};
use estande::io::svg::render_layout;
use fpg::config::FPGConfig;
use fpg::io;
use fpg::io::cli::{Cli, Mode};
use fpg::io::output::{AuditOutput, PlanOutput};
use fpg::opt::LayoutPlanner;
use fpg::opt::audit::audit_normalized;
use log::{error, info, warn};
use rayon::prelude::*;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            FPGConfig::default()
        }
        Some(config_file) => {
            io::read_json::<FPGConfig>(&config_file).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed FPGConfig");

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    //runs share nothing, every input gets its own planner
    let n_failed = args
        .input_file
        .par_iter()
        .map(|input_file| {
            let result = match args.mode {
                Mode::Generate => main_generate(input_file, &config, &args.solution_folder),
                Mode::Normalize => main_normalize(input_file, &config, &args.solution_folder),
            };
            if let Err(err) = &result {
                error!("[MAIN] {}: {err:#}", input_file.display());
            }
            result
        })
        .filter(|result| result.is_err())
        .count();

    if n_failed > 0 {
        bail!(
            "{n_failed} of {} input file(s) could not be processed",
            args.input_file.len()
        );
    }
    Ok(())
}

fn input_stem(input_file: &Path) -> Result<&str> {
    input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("invalid input file name: {}", input_file.display()))
}

fn main_generate(input_file: &Path, config: &FPGConfig, output_folder: &Path) -> Result<()> {
    let briefing = io::read_json::<ExtBriefing>(input_file)?;
    let stem = input_stem(input_file)?;

    let result = LayoutPlanner::new(config.clone()).plan_briefing(&briefing);
    let output = PlanOutput::new(&result, briefing, config.clone());
    let json_path = output_folder.join(output.file_name(stem));

    match &result {
        Ok(plan) => {
            let svg_path = output_folder.join(format!("plan_{stem}.svg"));
            io::write_plan(&output, &plan.svg, &json_path, &svg_path)?;
        }
        Err(err) => {
            //an error report, no plan is persisted
            warn!("[MAIN] {}: no plan produced ({})", input_file.display(), err.kind());
            io::write_json(&output, &json_path)?;
        }
    }

    Ok(())
}

fn main_normalize(input_file: &Path, config: &FPGConfig, output_folder: &Path) -> Result<()> {
    let ext_layout = io::read_json::<ExtNormalizedLayout>(input_file)?;
    let stem = input_stem(input_file)?;

    let audit = audit_normalized(&ext_layout, config)?;

    let svg = render_layout(
        &audit.layout,
        &config.catalog,
        &config.svg_draw_options,
        stem,
    );
    let output = AuditOutput::new(&audit, ext_layout);
    io::write_plan(
        &output,
        &svg,
        &output_folder.join(format!("norm_{stem}.json")),
        &output_folder.join(format!("norm_{stem}.svg")),
    )?;

    Ok(())
}
