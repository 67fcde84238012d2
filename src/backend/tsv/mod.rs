// =============================================================================
// BACKEND TSV — Tables délimitées ↔ Table en mémoire
// =============================================================================
//
// Toutes les tables du crosswalk sont des fichiers délimités avec une ligne
// d'en-tête :
//   - data/mondo/mondo_kgx_tsv_{edges,nodes}.tsv
//   - data/omop/CONCEPT.csv, CONCEPT_RELATIONSHIP.csv (tabulés malgré l'extension)
//   - data/mondo2omop/MONDO2OMOP.tsv (la sortie)
//
// Lecture :
//   en-tête        → noms de colonnes (les colonnes en trop sont conservées)
//   cellule vide   → Null
//   ligne courte   → complétée avec Null
//
// Écriture : en-tête puis une ligne par rangée, Null → cellule vide.
//
// Le typage n'est PAS fait ici : toute cellule lue est du texte, c'est le
// cœur qui la convertit selon le schéma.
//
// =============================================================================

use std::path::Path;
use tracing::debug;
use crate::backend::TableBackend;
use crate::config::PathsConfig;
use crate::core::table::Table;
use crate::core::typeside::Value;
use crate::error::{CrosswalkError, Result};

/// Lecteur / écrivain de fichiers délimités.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TsvBackend {
    delimiter: u8,
}

impl TsvBackend {
    /// Backend avec un délimiteur ASCII quelconque
    pub fn new(delimiter: u8) -> Self {
        TsvBackend { delimiter }
    }

    /// Backend tabulé
    pub fn tab() -> Self {
        TsvBackend::new(b'\t')
    }

    /// Backend configuré par `paths.delimiter`.
    pub fn from_config(paths: &PathsConfig) -> Result<Self> {
        let c = paths.delimiter;
        if !c.is_ascii() {
            return Err(CrosswalkError::Config(format!("délimiteur {:?} non ASCII", c)));
        }
        Ok(TsvBackend::new(c as u8))
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for TsvBackend {
    fn default() -> Self {
        TsvBackend::tab()
    }
}

impl TableBackend for TsvBackend {
    fn read_table(&self, name: &str, path: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut table = Table::new(name, columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Value::from_cell).collect());
        }

        debug!(
            table = name,
            path = %path.display(),
            rows = table.len(),
            columns = table.columns.len(),
            "table chargée"
        );
        Ok(table)
    }

    fn write_table(&self, table: &Table, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(Value::to_cell))?;
        }
        writer.flush()?;

        debug!(table = %table.name, path = %path.display(), rows = table.len(), "table écrite");
        Ok(())
    }

    fn name(&self) -> &str {
        "tsv"
    }
}
