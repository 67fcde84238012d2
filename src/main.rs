// =============================================================================
// MONDO2OMOP — Point d'entrée : le crosswalk en ligne de commande
// =============================================================================
//
// Trois sous-commandes :
//   fetch : prépare data/, télécharge et extrait la release Mondo KGX
//   map   : charge les quatre tables, exécute le pipeline, écrit la sortie
//   run   : fetch puis map
//
// La sortie n'est écrite qu'APRÈS un run réussi : une erreur de schéma
// (ou toute autre erreur fatale) ne laisse aucun fichier partiel.
//
// Journalisation : RUST_LOG (défaut "mondo2omop=info").
//
// =============================================================================

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use mondo2omop::backend::fetch::MondoRelease;
use mondo2omop::backend::tsv::TsvBackend;
use mondo2omop::backend::TableBackend;
use mondo2omop::config::CrosswalkConfig;
use mondo2omop::core::pipeline::{self, CrosswalkInputs};

#[derive(Parser)]
#[command(name = "mondo2omop")]
#[command(about = "Crosswalk des termes de maladie Mondo vers les concepts standard OMOP")]
struct Cli {
    /// Fichier de configuration YAML (défauts intégrés sinon)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Télécharge et extrait la release Mondo KGX
    Fetch {
        /// Date de release, YYYY-MM-DD
        #[arg(long, env = "MONDO_VERSION")]
        version: Option<String>,
    },
    /// Exécute le crosswalk sur des fichiers locaux
    Map {
        #[arg(long)]
        edges: Option<PathBuf>,
        #[arg(long)]
        nodes: Option<PathBuf>,
        /// Table OMOP CONCEPT
        #[arg(long)]
        concepts: Option<PathBuf>,
        /// Table OMOP CONCEPT_RELATIONSHIP
        #[arg(long)]
        relationships: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// fetch puis map, avec les chemins de la configuration
    Run {
        #[arg(long, env = "MONDO_VERSION")]
        version: Option<String>,
    },
}

/// Chemins des tables d'un run `map`.
struct MapPaths {
    edges: PathBuf,
    nodes: PathBuf,
    concepts: PathBuf,
    relationships: PathBuf,
    output: PathBuf,
}

impl MapPaths {
    fn from_config(config: &CrosswalkConfig) -> Self {
        let release = MondoRelease::new(&config.release);
        let kgx = release.kgx_files(&config.paths.mondo_dir());
        MapPaths {
            edges: kgx.edges,
            nodes: kgx.nodes,
            concepts: config.paths.concept_path(),
            relationships: config.paths.concept_relationship_path(),
            output: config.paths.output_path(),
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mondo2omop=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CrosswalkConfig> {
    match path {
        Some(path) => CrosswalkConfig::from_yaml_file(path)
            .with_context(|| format!("lecture de la configuration {}", path.display())),
        None => Ok(CrosswalkConfig::default()),
    }
}

fn fetch(config: &CrosswalkConfig, version: Option<&str>) -> Result<()> {
    let mut release = MondoRelease::new(&config.release);
    if let Some(version) = version {
        release = release.with_version(version);
    }
    let files = release
        .fetch(&config.paths)
        .with_context(|| format!("récupération de Mondo {}", release.version()))?;
    info!(edges = %files.edges.display(), nodes = %files.nodes.display(), "release Mondo prête");
    Ok(())
}

fn map(config: &CrosswalkConfig, paths: &MapPaths) -> Result<()> {
    let backend = TsvBackend::from_config(&config.paths)?;
    let read = |name: &str, path: &Path| {
        backend
            .read_table(name, path)
            .with_context(|| format!("lecture de {}", path.display()))
    };

    let inputs = CrosswalkInputs {
        edges: read("edges", &paths.edges)?,
        nodes: read("nodes", &paths.nodes)?,
        concepts: read("concept", &paths.concepts)?,
        relationships: read("concept_relationship", &paths.relationships)?,
    };

    info!(backend = backend.name(), "tables d'entrée chargées");
    let output = pipeline::run(&inputs, config).context("exécution du crosswalk")?;

    if let Some(parent) = paths.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    backend
        .write_table(&output.table, &paths.output)
        .with_context(|| format!("écriture de {}", paths.output.display()))?;

    println!("{}", output.report);
    println!("Sortie : {}", paths.output.display());
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Fetch { version } => fetch(&config, version.as_deref()),
        Command::Map {
            edges,
            nodes,
            concepts,
            relationships,
            output,
        } => {
            let defaults = MapPaths::from_config(&config);
            let paths = MapPaths {
                edges: edges.unwrap_or(defaults.edges),
                nodes: nodes.unwrap_or(defaults.nodes),
                concepts: concepts.unwrap_or(defaults.concepts),
                relationships: relationships.unwrap_or(defaults.relationships),
                output: output.unwrap_or(defaults.output),
            };
            map(&config, &paths)
        }
        Command::Run { version } => {
            fetch(&config, version.as_deref())?;
            map(&config, &MapPaths::from_config(&config))
        }
    }
}
