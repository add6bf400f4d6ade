//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here and nowhere else.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "jhipster-jdl",
    bin_name = "jhipster-jdl",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Merge JDL documents and prepare JHipster entities",
    long_about = "jhipster-jdl reads JDL syntax exports (JSON or TOML), merges them \
                  into one model, writes entity descriptors and prepares them for \
                  code generation.",
    after_help = "EXAMPLES:\n\
        \x20 jhipster-jdl merge app.json entities.toml\n\
        \x20 jhipster-jdl entities app.json --out-dir .jhipster\n\
        \x20 jhipster-jdl prepare --entities-dir .jhipster --database mongodb\n\
        \x20 jhipster-jdl completions bash > ~/.local/share/bash-completion/completions/jhipster-jdl",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge JDL documents and print the result.
    #[command(
        visible_alias = "m",
        about = "Merge JDL documents",
        after_help = "EXAMPLES:\n\
            \x20 jhipster-jdl merge base.json extra.toml\n\
            \x20 jhipster-jdl merge base.json --output-format json"
    )]
    Merge(MergeArgs),

    /// Convert merged documents into entity descriptors.
    #[command(
        about = "Write entity descriptors",
        after_help = "EXAMPLES:\n\
            \x20 jhipster-jdl entities app.json                 # print to stdout\n\
            \x20 jhipster-jdl entities app.json --out-dir .jhipster"
    )]
    Entities(EntitiesArgs),

    /// Prepare entities for generation.
    #[command(
        about = "Prepare entities",
        after_help = "EXAMPLES:\n\
            \x20 jhipster-jdl prepare                            # reads the configured entities dir\n\
            \x20 jhipster-jdl prepare --jdl app.json --application store\n\
            \x20 jhipster-jdl prepare --entities-dir .jhipster --database cassandra"
    )]
    Prepare(PrepareArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 jhipster-jdl completions bash > ~/.local/share/bash-completion/completions/jhipster-jdl\n\
            \x20 jhipster-jdl completions zsh  > ~/.zfunc/_jhipster-jdl"
    )]
    Completions(CompletionsArgs),

    /// Inspect the loaded configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 jhipster-jdl config get generation.database_type\n\
            \x20 jhipster-jdl config list"
    )]
    Config(ConfigCommands),
}

// ── merge ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Documents to merge, left to right.
    #[arg(value_name = "DOC", required = true, help = "JDL documents (.json or .toml)")]
    pub documents: Vec<PathBuf>,

    /// Treat every relationship as unidirectional.
    #[arg(long = "unidirectional", help = "Make every relationship unidirectional")]
    pub unidirectional: bool,
}

// ── entities ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    #[arg(value_name = "DOC", required = true, help = "JDL documents (.json or .toml)")]
    pub documents: Vec<PathBuf>,

    /// Write one `<Entity>.json` per entity instead of printing them.
    #[arg(long = "out-dir", value_name = "DIR", help = "Directory to write descriptors to")]
    pub out_dir: Option<PathBuf>,

    #[arg(long = "unidirectional", help = "Make every relationship unidirectional")]
    pub unidirectional: bool,
}

// ── prepare ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PrepareArgs {
    /// Directory of entity descriptors; defaults to `generation.entities_dir`.
    #[arg(
        long = "entities-dir",
        value_name = "DIR",
        conflicts_with = "jdl",
        help = "Read descriptors from this directory"
    )]
    pub entities_dir: Option<PathBuf>,

    /// Convert these documents in memory instead of reading descriptors.
    #[arg(long = "jdl", value_name = "DOC", num_args = 1.., help = "Prepare straight from JDL documents")]
    pub jdl: Vec<PathBuf>,

    /// Application whose configuration drives the preparation.
    #[arg(long = "application", value_name = "NAME", requires = "jdl", help = "Application base name")]
    pub application: Option<String>,

    /// Overrides the application and the configured database type.
    #[arg(long = "database", value_name = "TYPE", value_enum, help = "Database type")]
    pub database: Option<Database>,
}

/// Database families accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Database {
    Sql,
    Mongodb,
    Cassandra,
    Couchbase,
    Neo4j,
    No,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.database_type`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the default configuration file.
    Path,
}
