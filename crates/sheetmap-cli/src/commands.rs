use anyhow::{Context, Result, bail};
use tracing::info;

use sheetmap_cli::pipeline;
use sheetmap_cli::types::{RunOptions, RunResult};
use sheetmap_ingest::read_workbook;
use sheetmap_map::TemplateRepository;
use sheetmap_model::RuleMarkers;

use crate::cli::{RunArgs, SheetsArgs};
use crate::summary::{print_mapping, print_sheets, print_template_ids};

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let workbook = read_workbook(&args.workbook)
        .with_context(|| format!("read {}", args.workbook.display()))?;
    print_sheets(&workbook);
    Ok(())
}

pub fn run_templates_list(repository: &TemplateRepository) -> Result<()> {
    let ids = repository.list().context("list templates")?;
    print_template_ids(&ids);
    Ok(())
}

pub fn run_templates_show(repository: &TemplateRepository, id: &str) -> Result<()> {
    let document = match repository.load(id) {
        Ok(document) => document,
        Err(error) => {
            if let Some(suggestion) = error.suggestion() {
                eprintln!("hint: {suggestion}");
            }
            return Err(error).context("load template");
        }
    };
    println!("Source sheet: {}", document.source_sheet);
    println!("Target sheet: {}", document.target_sheet);
    if let Some(saved_at) = &document.saved_at {
        println!("Saved at: {saved_at}");
    }
    let mapping = document.prefill(&RuleMarkers::default());
    let mut targets = document.target_columns_snapshot.clone();
    for target in mapping.keys() {
        if !targets.contains(target) {
            targets.push(target.clone());
        }
    }
    print_mapping(&mapping, &targets);
    Ok(())
}

pub fn run_templates_delete(repository: &TemplateRepository, id: &str) -> Result<()> {
    if !repository.delete(id).context("delete template")? {
        bail!("template not found: {id}");
    }
    info!(template = %id, "template deleted");
    println!("Deleted template: {id}");
    Ok(())
}

pub fn run_mapping(args: RunArgs, repository: &TemplateRepository) -> Result<RunResult> {
    let options = RunOptions {
        source: args.source,
        target: args.target,
        source_sheet: args.source_sheet,
        target_sheet: args.target_sheet,
        template: args.template,
        filter: args.filter,
        overrides: args.set,
        save_template: args.save_template,
        output: args.output,
        markers: RuleMarkers::new(args.blank_marker, args.manual_marker),
    };
    pipeline::run(&options, repository)
}
