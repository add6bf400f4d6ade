//! `jhipster-jdl prepare`: run the entity-preparation pipeline.

use serde::Serialize;
use tracing::{debug, instrument};

use jhipster_adapters::{LocalDescriptorStore, MemoryDescriptorStore};
use jhipster_core::{
    application::{DescriptorStore, PreparationService},
    domain::{ApplicationContext, DatabaseType, Diagnostics, PreparedEntity},
};

use super::counted;
use crate::{
    cli::{Database, PrepareArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// JSON shape of `--output-format json`.
#[derive(Serialize)]
struct PrepareReport<'a> {
    entities: &'a [PreparedEntity],
    diagnostics: &'a Diagnostics,
}

/// Prepared entities go to stdout as JSON. Diagnostics are logged as
/// warnings and, in JSON format, included in the report.
#[instrument(skip_all)]
pub fn execute(args: PrepareArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (service, context) = if args.jdl.is_empty() {
        from_descriptor_dir(&args, &config)?
    } else {
        from_documents(&args, &config)?
    };
    debug!(base_name = %context.base_name, database = %context.database_type, "Preparation context");

    let preparation = service.prepare_stored(&context)?;

    if output.is_json() {
        output.emit_json(&PrepareReport {
            entities: &preparation.entities,
            diagnostics: &preparation.diagnostics,
        })?;
    } else {
        output.emit_json(&preparation.entities)?;
        output.success(&format!(
            "Prepared {} for {} ({})",
            counted(preparation.entities.len(), "entity", "entities"),
            context.database_type,
            counted(preparation.diagnostics.warnings().count(), "warning", "warnings"),
        ))?;
    }
    Ok(())
}

/// Descriptors already on disk, with the configured database.
fn from_descriptor_dir(args: &PrepareArgs, config: &AppConfig) -> CliResult<(PreparationService, ApplicationContext)> {
    let dir = args.entities_dir.clone().unwrap_or_else(|| config.entities_dir().to_path_buf());
    let store = LocalDescriptorStore::new(&dir);
    if store.list()?.is_empty() {
        return Err(CliError::invalid_input(format!(
            "no entity descriptors found in {}",
            dir.display()
        )));
    }
    let context = with_database(config.fallback_context(), args.database);
    Ok((PreparationService::new(Box::new(store)), context))
}

/// Documents merged and converted in memory; nothing is written.
fn from_documents(args: &PrepareArgs, config: &AppConfig) -> CliResult<(PreparationService, ApplicationContext)> {
    let merged = super::model_service(config, false).merge(&args.jdl)?;
    let service = PreparationService::new(Box::new(MemoryDescriptorStore::new()));
    service.export_descriptors(&merged, &config.conversion_options())?;
    let context = PreparationService::context_for(&merged, args.application.as_deref(), config.fallback_context())?;
    Ok((service, with_database(context, args.database)))
}

/// `--database` wins over the application and the configuration.
fn with_database(mut context: ApplicationContext, database: Option<Database>) -> ApplicationContext {
    if let Some(database) = database {
        context.database_type = match database {
            Database::Sql => DatabaseType::Sql,
            Database::Mongodb => DatabaseType::Mongodb,
            Database::Cassandra => DatabaseType::Cassandra,
            Database::Couchbase => DatabaseType::Couchbase,
            Database::Neo4j => DatabaseType::Neo4j,
            Database::No => DatabaseType::No,
        };
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn database_flag_overrides_context() {
        let context = ApplicationContext::new("store", DatabaseType::Mongodb);
        assert_eq!(with_database(context.clone(), None).database_type, DatabaseType::Mongodb);
        let overridden = with_database(context, Some(Database::Cassandra));
        assert_eq!(overridden.database_type, DatabaseType::Cassandra);
        assert_eq!(overridden.base_name, "store");
    }

    #[test]
    fn cli_names_match_core_names() {
        for database in Database::value_variants() {
            let context = with_database(ApplicationContext::default(), Some(*database));
            let name = database.to_possible_value().unwrap();
            assert_eq!(context.database_type.as_str(), name.get_name());
        }
    }
}
