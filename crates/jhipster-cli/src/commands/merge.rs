//! `jhipster-jdl merge`: print the merged model.

use tracing::instrument;

use jhipster_core::application::ModelSummary;

use super::counted;
use crate::{cli::MergeArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Canonical JDL in human and plain formats, a [`ModelSummary`] in JSON.
#[instrument(skip_all, fields(documents = args.documents.len()))]
pub fn execute(args: MergeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let merged = super::model_service(&config, args.unidirectional).merge(&args.documents)?;

    if output.is_json() {
        output.emit_json(&ModelSummary::of(&merged))?;
    } else {
        output.emit(&merged.to_string())?;
        output.success(&format!(
            "Merged {}: {}, {}",
            counted(args.documents.len(), "document", "documents"),
            counted(merged.entity_quantity(), "entity", "entities"),
            counted(merged.relationship_quantity(), "relationship", "relationships"),
        ))?;
    }
    Ok(())
}
