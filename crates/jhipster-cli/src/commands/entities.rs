//! `jhipster-jdl entities`: convert merged documents to entity descriptors.

use tracing::{info, instrument};

use jhipster_adapters::{LocalDescriptorStore, MemoryDescriptorStore};
use jhipster_core::application::PreparationService;

use super::counted;
use crate::{cli::EntitiesArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Writes `<Entity>.json` files with `--out-dir`, prints a JSON array otherwise.
#[instrument(skip_all, fields(documents = args.documents.len()))]
pub fn execute(args: EntitiesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let merged = super::model_service(&config, args.unidirectional).merge(&args.documents)?;
    if merged.entity_quantity() == 0 {
        output.warning("The documents declare no entities")?;
    }

    let options = config.conversion_options();
    match args.out_dir {
        Some(dir) => {
            let store = LocalDescriptorStore::new(dir);
            let descriptors = PreparationService::new(Box::new(store.clone())).export_descriptors(&merged, &options)?;
            info!(dir = %store.root().display(), "Descriptors exported");
            for descriptor in &descriptors {
                output.print(&store.path_of(&descriptor.name).display().to_string())?;
            }
            output.success(&format!(
                "Wrote {} to {}",
                counted(descriptors.len(), "entity descriptor", "entity descriptors"),
                store.root().display()
            ))?;
        }
        None => {
            let descriptors =
                PreparationService::new(Box::new(MemoryDescriptorStore::new())).export_descriptors(&merged, &options)?;
            output.emit_json(&descriptors)?;
        }
    }
    Ok(())
}
