// =============================================================================
// BACKEND FETCH — Récupération de la release Mondo KGX
// =============================================================================
//
// Les releases Mondo au format KGX sont publiées par date :
//
//   https://kg-hub.berkeleybop.io/kg-obo/mondo/2025-04-01/mondo_kgx_tsv.tar.gz
//
// L'archive contient (à plat) les deux tables du graphe :
//   mondo_kgx_tsv_edges.tsv
//   mondo_kgx_tsv_nodes.tsv
//
// ÉTAPES :
//   1. prepare_dirs : data/mondo, data/omop, data/mondo2omop
//   2. download     : GET bloquant, un statut HTTP d'erreur est fatal
//   3. extract      : gunzip + untar dans data/mondo, puis vérification que
//                     les deux fichiers attendus sont bien là
//
// La date de release est un paramètre (configuration, CLI ou MONDO_VERSION),
// jamais une constante.
//
// =============================================================================

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use flate2::read::GzDecoder;
use tar::Archive;
use tracing::info;
use crate::config::{PathsConfig, ReleaseConfig};
use crate::error::{CrosswalkError, Result};

/// Les deux tables extraites d'une release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KgxFiles {
    pub edges: PathBuf,
    pub nodes: PathBuf,
}

/// Une release Mondo KGX précise.
#[derive(Debug, Clone)]
pub struct MondoRelease {
    release: ReleaseConfig,
}

impl MondoRelease {
    pub fn new(release: &ReleaseConfig) -> Self {
        MondoRelease {
            release: release.clone(),
        }
    }

    /// Même release, autre date.
    pub fn with_version(mut self, version: &str) -> Self {
        self.release.version = version.to_string();
        self
    }

    pub fn version(&self) -> &str {
        &self.release.version
    }

    /// URL de l'archive : base / version / archive
    pub fn archive_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.release.base_url.trim_end_matches('/'),
            self.release.version,
            self.release.archive_name
        )
    }

    /// Les fichiers attendus après extraction dans `dir`.
    pub fn kgx_files(&self, dir: &Path) -> KgxFiles {
        KgxFiles {
            edges: dir.join(&self.release.edges_file),
            nodes: dir.join(&self.release.nodes_file),
        }
    }

    /// Crée l'arborescence de données si besoin.
    pub fn prepare_dirs(paths: &PathsConfig) -> Result<()> {
        for dir in [paths.mondo_dir(), paths.omop_dir(), paths.output_dir()] {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Télécharge l'archive dans `dir` et retourne son chemin.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        let url = self.archive_url();
        let target = dir.join(&self.release.archive_name);
        info!(%url, target = %target.display(), "téléchargement de la release Mondo");

        let mut response = reqwest::blocking::get(&url)?.error_for_status()?;
        let mut file = BufWriter::new(File::create(&target)?);
        let bytes = response.copy_to(&mut file)?;
        file.flush()?;

        info!(bytes, "archive téléchargée");
        Ok(target)
    }

    /// Extrait l'archive dans `dir` et vérifie la présence des deux tables.
    pub fn extract(&self, archive: &Path, dir: &Path) -> Result<KgxFiles> {
        let decoder = GzDecoder::new(File::open(archive)?);
        Archive::new(decoder).unpack(dir)?;

        let files = self.kgx_files(dir);
        for path in [&files.edges, &files.nodes] {
            if !path.is_file() {
                return Err(CrosswalkError::Archive(format!(
                    "{} absent après extraction de {}",
                    path.display(),
                    archive.display()
                )));
            }
        }
        info!(dir = %dir.display(), "archive extraite");
        Ok(files)
    }

    /// Répertoires + téléchargement + extraction.
    pub fn fetch(&self, paths: &PathsConfig) -> Result<KgxFiles> {
        Self::prepare_dirs(paths)?;
        let dir = paths.mondo_dir();
        let archive = self.download(&dir)?;
        self.extract(&archive, &dir)
    }
}
