//! Pathweaver CLI - knowledge maps and learning journeys from documents

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pathweaver_core::commands::journey::{self as journeys, JourneyRequest};
use pathweaver_core::commands::{ingest, map, preferences};
use pathweaver_core::config::Config;
use pathweaver_core::domain::journey::{JourneyType, Level, UserPreferences};
use pathweaver_core::domain::map::KnowledgeMap;
use pathweaver_core::nlp::{HeuristicAnnotator, PrecomputedAnnotator, TextAnnotator};
use pathweaver_core::storage::{ArtifactStore, DocumentRecord, JourneyRecord};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pathweaver")]
#[command(author, version, about = "Knowledge maps and learning journeys from documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum JourneyTypeArg {
    #[value(name = "pattern_based", alias = "pattern-based")]
    PatternBased,
    Hierarchical,
    Associative,
}

impl From<JourneyTypeArg> for JourneyType {
    fn from(arg: JourneyTypeArg) -> Self {
        match arg {
            JourneyTypeArg::PatternBased => JourneyType::PatternBased,
            JourneyTypeArg::Hierarchical => JourneyType::Hierarchical,
            JourneyTypeArg::Associative => JourneyType::Associative,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Low => Level::Low,
            LevelArg::Medium => Level::Medium,
            LevelArg::High => Level::High,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract knowledge from a document and build its map
    Ingest {
        /// Plain text file, or a processed-content JSON file
        file: PathBuf,
        /// Use pre-computed annotations (JSON) instead of the built-in annotator
        #[arg(long)]
        annotations: Option<PathBuf>,
    },

    /// Rebuild a document's knowledge map from its stored knowledge
    Map {
        /// Document ID
        document_id: String,
    },

    /// Generate a learning journey through a document's map
    Journey {
        /// Document ID
        document_id: String,
        /// Concept to start from
        start: String,
        /// Force a journey type
        #[arg(long = "type")]
        journey_type: Option<JourneyTypeArg>,
        /// Pattern-seeking level
        #[arg(long)]
        pattern_seeking: Option<LevelArg>,
        /// Hierarchical preference
        #[arg(long)]
        hierarchical: Option<LevelArg>,
        /// Associative preference
        #[arg(long)]
        associative: Option<LevelArg>,
        /// Apply this user's stored preferences
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show a stored artifact
    Show {
        #[command(subcommand)]
        what: ShowAction,
    },

    /// List ingested documents
    Documents,

    /// Manage user preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ShowAction {
    /// Show a document's knowledge map
    Map { document_id: String },
    /// Show a journey
    Journey { id: String },
    /// Show a document record
    Document { id: String },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Set a preference
    Set {
        user: String,
        key: String,
        value: String,
    },
    /// Show a user's preferences
    Show { user: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show configuration file path
    Path,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathweaver=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let result = run(cli);

    if let Err(e) = &result {
        if let Some(error) = e.downcast_ref::<pathweaver_core::Error>() {
            debug!(code = error.code(), "Command failed");
            if let Some(suggestion) = error.suggestion() {
                eprintln!("hint: try `{}`", suggestion);
            }
        }
    }
    result
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let out = Output {
        format: cli.format,
        quiet: cli.quiet,
    };

    // Config and store are only loaded for commands that need them
    let open = || -> anyhow::Result<(Config, ArtifactStore)> {
        let config = Config::load()?;
        let store = ArtifactStore::open(&config.storage)?;
        Ok((config, store))
    };

    match cli.command {
        Commands::Ingest { file, annotations } => {
            let (config, store) = open()?;
            cmd_ingest(&config, &store, &file, annotations.as_deref(), out)
        }

        Commands::Map { document_id } => {
            let (config, store) = open()?;
            cmd_map(&config, &store, &document_id, out)
        }

        Commands::Journey {
            document_id,
            start,
            journey_type,
            pattern_seeking,
            hierarchical,
            associative,
            user,
        } => {
            let mut overrides = UserPreferences::new();
            if let Some(t) = journey_type {
                overrides = overrides.with_journey_type(t.into());
            }
            if let Some(level) = pattern_seeking {
                overrides = overrides.with_pattern_seeking(level.into());
            }
            if let Some(level) = hierarchical {
                overrides = overrides.with_hierarchical(level.into());
            }
            if let Some(level) = associative {
                overrides = overrides.with_associative(level.into());
            }
            let mut request = JourneyRequest::new(document_id, start).with_overrides(overrides);
            if let Some(user) = user {
                request = request.with_user(user);
            }

            let (config, store) = open()?;
            cmd_journey(&config, &store, &request, out)
        }

        Commands::Show { what } => {
            let (_, store) = open()?;
            cmd_show(&store, what, out)
        }

        Commands::Documents => {
            let (_, store) = open()?;
            cmd_documents(&store, out)
        }

        Commands::Prefs { action } => {
            let (_, store) = open()?;
            cmd_prefs(&store, action, out)
        }

        Commands::Config { action } => cmd_config(action, out),
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Clone, Copy)]
struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_ingest(
    config: &Config,
    store: &ArtifactStore,
    file: &Path,
    annotations: Option<&Path>,
    out: Output,
) -> anyhow::Result<()> {
    let annotator: Arc<dyn TextAnnotator> = match annotations {
        Some(path) => Arc::new(PrecomputedAnnotator::from_json_file(path)?),
        None => Arc::new(HeuristicAnnotator::new()),
    };

    let report = ingest::ingest_file(config, store, annotator, file)?;

    if out.is_json() {
        return out.json(&report);
    }
    if out.quiet {
        println!("{}", report.document.id);
        return Ok(());
    }

    println!("Document ingested!");
    println!("  ID: {}", report.document.id);
    println!("  Source: {}", report.document.source);
    println!("  Status: {}", report.document.status);
    println!("  Concepts: {}", report.concepts);
    println!("  Relationships: {}", report.relationships);
    println!("  Clusters: {}", report.clusters);
    println!(
        "  Map: {} nodes, {} links",
        report.map.total_nodes, report.map.total_links
    );
    if report.concepts > 0 {
        println!("\nNext steps:");
        println!("  pathweaver show map {}", report.document.id);
        println!("  pathweaver journey {} <concept>", report.document.id);
    }
    Ok(())
}

fn cmd_map(config: &Config, store: &ArtifactStore, document_id: &str, out: Output) -> anyhow::Result<()> {
    let map = map::rebuild_map(config, store, document_id)?;
    if out.is_json() {
        return out.json(&map);
    }
    if !out.quiet {
        println!(
            "Map rebuilt: {} nodes, {} links, {} clusters",
            map.metadata.total_nodes, map.metadata.total_links, map.metadata.total_clusters
        );
    }
    Ok(())
}

fn cmd_journey(
    config: &Config,
    store: &ArtifactStore,
    request: &JourneyRequest,
    out: Output,
) -> anyhow::Result<()> {
    let record = journeys::create_journey(config, store, request)?;
    if out.is_json() {
        return out.json(&record);
    }
    if out.quiet {
        println!("{}", record.id);
        return Ok(());
    }
    print_journey(&record);
    Ok(())
}

fn cmd_show(store: &ArtifactStore, what: ShowAction, out: Output) -> anyhow::Result<()> {
    match what {
        ShowAction::Map { document_id } => {
            let map = map::show_map(store, &document_id)?;
            if out.is_json() {
                return out.json(&map);
            }
            print_map(&map);
        }
        ShowAction::Journey { id } => {
            let record = journeys::show_journey(store, &id)?;
            if out.is_json() {
                return out.json(&record);
            }
            print_journey(&record);
        }
        ShowAction::Document { id } => {
            let document = store.load_document(&id)?;
            if out.is_json() {
                return out.json(&document);
            }
            print_document(&document);
        }
    }
    Ok(())
}

fn cmd_documents(store: &ArtifactStore, out: Output) -> anyhow::Result<()> {
    let documents = store.list_documents()?;
    if out.is_json() {
        return out.json(&documents);
    }

    if documents.is_empty() {
        if !out.quiet {
            println!("No documents found.");
            println!("\nIngest one with: pathweaver ingest <file>");
        }
        return Ok(());
    }

    if !out.quiet {
        println!("Documents:");
    }
    for d in documents {
        println!(
            "  {}  {:<20}  {}  ({})",
            d.id,
            d.status.as_str(),
            d.source,
            d.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn cmd_prefs(store: &ArtifactStore, action: PrefsAction, out: Output) -> anyhow::Result<()> {
    let prefs = match action {
        PrefsAction::Set { user, key, value } => {
            let prefs = preferences::set_preference(store, &user, &key, &value)?;
            if !out.is_json() {
                if !out.quiet {
                    println!("Set {} = {} for '{}'", key, value, user);
                }
                return Ok(());
            }
            prefs
        }
        PrefsAction::Show { user } => preferences::show_preferences(store, &user)?,
    };

    if out.is_json() {
        return out.json(&prefs);
    }
    for (key, value) in prefs.to_map() {
        match value {
            serde_json::Value::String(s) => println!("{} = {}", key, s),
            other => println!("{} = {}", key, other),
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, out: Output) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !out.quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            if out.is_json() {
                let map: serde_json::Map<String, serde_json::Value> = items
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                return out.json(&map);
            }
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !out.quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

// ============================================================================
// Text rendering
// ============================================================================

fn print_map(map: &KnowledgeMap) {
    println!(
        "Knowledge map: {} nodes, {} links, {} clusters",
        map.metadata.total_nodes, map.metadata.total_links, map.metadata.total_clusters
    );
    if map.is_empty() {
        return;
    }

    println!("\nConcepts:");
    for node in &map.nodes {
        println!(
            "  {:<30} {:<12} importance {:.3}  at ({:.2}, {:.2})",
            node.label,
            node.kind.as_str(),
            node.importance, node.x, node.y
        );
    }

    if !map.clusters.is_empty() {
        println!("\nClusters:");
        for cluster in &map.clusters {
            println!("  [{}] {}: {}", cluster.id, cluster.name, cluster.concepts.join(", "));
        }
    }

    if !map.hierarchy.is_empty() {
        println!("\nHierarchy roots: {}", map.hierarchy.roots.join(", "));
    }
}

fn print_journey(record: &JourneyRecord) {
    let journey = &record.journey;
    println!("Journey {}", record.id);
    println!("  Document: {}", record.document_id);
    println!("  Start: {}", journey.start_concept);
    println!("  Type: {}", journey.metadata.journey_type);
    println!("  Pattern focus: {}", journey.metadata.pattern_focus);
    println!("  Complexity: {}", journey.metadata.complexity);

    if journey.is_empty() {
        println!("\nNo path: '{}' is not in the knowledge map.", journey.start_concept);
        return;
    }

    println!("\nPath:");
    for (i, id) in journey.path.iter().enumerate() {
        match journey.content.get(id).and_then(|c| c.cluster.as_deref()) {
            Some(cluster) => println!("  {}. {} ({})", i + 1, id, cluster),
            None => println!("  {}. {}", i + 1, id),
        }
    }
}

fn print_document(document: &DocumentRecord) {
    println!("Document: {}", document.id);
    println!("  Source: {}", document.source);
    println!("  Status: {}", document.status);
    println!("  Created: {}", document.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated: {}", document.updated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(error) = &document.error {
        println!("  Error: {}", error);
    }
}
