//! Mapping run pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the source and target workbooks and pick one sheet each
//! 2. **Prefill**: Load the selected template (a failure only adds a notice)
//! 3. **Session**: Apply the search filter and `--set` overrides
//! 4. **Transform**: Resolve the complete mapping and build the output table
//! 5. **Persist**: Save the template and write the output file when requested
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use sheetmap_ingest::read_workbook;
use sheetmap_map::{MappingSession, TemplateRepository};
use sheetmap_model::{Mapping, RuleMarkers, Sheet, TemplateDocument};
use sheetmap_output::write_output;
use sheetmap_transform::transform_with_report;

use crate::types::{ColumnOverride, RunOptions, RunResult};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Selected source and target sheets.
#[derive(Debug)]
pub struct IngestResult {
    pub source: Sheet,
    pub target: Sheet,
}

/// Read both workbooks and select the requested (or first) sheets.
pub fn ingest(options: &RunOptions) -> Result<IngestResult> {
    let source = read_sheet(&options.source, options.source_sheet.as_deref())
        .context("read source workbook")?;
    let target = read_sheet(&options.target, options.target_sheet.as_deref())
        .context("read target workbook")?;
    info!(
        source_sheet = %source.name,
        source_rows = source.table.row_count(),
        source_columns = source.table.column_count(),
        target_sheet = %target.name,
        target_columns = target.table.column_count(),
        "ingest complete"
    );
    Ok(IngestResult { source, target })
}

fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Sheet> {
    let workbook = read_workbook(path)?;
    let selected = workbook
        .select(sheet)
        .with_context(|| format!("select sheet in {}", path.display()))?;
    Ok(selected.clone())
}

// ============================================================================
// Stage 2: Prefill
// ============================================================================

/// Load a template for prefill.
///
/// A missing or unreadable template is not fatal: the user message is
/// returned as a notice and the run continues with an empty prefill.
pub fn load_prefill(
    repository: &TemplateRepository,
    template: Option<&str>,
    notices: &mut Vec<String>,
) -> Option<TemplateDocument> {
    let id = template?;
    match repository.load(id) {
        Ok(document) => Some(document),
        Err(error) => {
            warn!(template = %id, %error, "template load failed, continuing with empty mapping");
            notices.push(error.user_message());
            None
        }
    }
}

// ============================================================================
// Stage 3: Session
// ============================================================================

/// Build the mapping session and apply filter and overrides.
pub fn build_session(
    ingest: &IngestResult,
    document: Option<&TemplateDocument>,
    filter: Option<&str>,
    overrides: &[ColumnOverride],
    markers: &RuleMarkers,
) -> Result<MappingSession> {
    let mut session = MappingSession::new(
        ingest.target.table.column_names(),
        ingest.source.table.column_names(),
        markers.clone(),
    );
    if let Some(document) = document {
        session = session.with_template(document);
    }
    if let Some(filter) = filter {
        session.set_filter(filter);
    }
    for column_override in overrides {
        session
            .choose(&column_override.target, column_override.choice.clone())
            .with_context(|| format!("apply --set {column_override}"))?;
    }
    Ok(session)
}

// ============================================================================
// Stages 4-5: Transform and persist
// ============================================================================

/// Run the whole pipeline.
pub fn run(options: &RunOptions, repository: &TemplateRepository) -> Result<RunResult> {
    let span = info_span!("run", source = %options.source.display(), target = %options.target.display());
    let _guard = span.enter();
    let mut notices = Vec::new();

    let ingest = ingest(options)?;
    let document = load_prefill(repository, options.template.as_deref(), &mut notices);
    let session = build_session(
        &ingest,
        document.as_ref(),
        options.filter.as_deref(),
        &options.overrides,
        &options.markers,
    )?;

    let mapping: Mapping = session.resolve();
    let summary = session.summary(&mapping);
    let (output, report) =
        transform_with_report(&ingest.source.table, session.target_columns(), &mapping);
    info!(
        filled = summary.filled,
        total = summary.total,
        rows = output.row_count(),
        "transform complete"
    );

    let saved_template = match options.save_template.as_deref() {
        Some(name) => {
            let document = session.to_document(&ingest.source.name, &ingest.target.name, &mapping);
            match repository.save(name, &document) {
                Ok(id) => Some(id),
                Err(error) => {
                    warn!(template = %name, %error, "template save failed");
                    notices.push(error.user_message());
                    None
                }
            }
        }
        None => None,
    };

    if let Some(path) = &options.output {
        write_output(&output, path).context("write output")?;
    }

    Ok(RunResult {
        source_sheet: ingest.source.name,
        target_sheet: ingest.target.name,
        mapping,
        summary,
        report,
        output,
        output_path: options.output.clone(),
        saved_template,
        notices,
    })
}
