// =============================================================================
// BACKEND — Les collaborateurs d'entrée/sortie
// =============================================================================
//
// Le backend fait le lien entre le cœur pur et le monde extérieur :
//   - tsv   : lecture / écriture des tables délimitées (KGX, OMOP, sortie)
//   - fetch : récupération et extraction de la release Mondo KGX
//
// Le cœur (module core) ne connaît JAMAIS les backends. Son seul contrat
// avec eux est "une Table à colonnes nommées".
//
// =============================================================================

pub mod tsv;
pub mod fetch;

use std::path::Path;
use crate::core::table::Table;
use crate::error::Result;

/// Trait abstrait pour tout support de tables.
///
/// Chaque backend sait charger une Table depuis un chemin et en écrire une.
pub trait TableBackend {
    /// Charge la table `name` depuis `path`.
    /// Le nom sert aux messages d'erreur (ex: colonnes manquantes).
    fn read_table(&self, name: &str, path: &Path) -> Result<Table>;

    /// Écrit la table à `path` (le répertoire parent doit exister).
    fn write_table(&self, table: &Table, path: &Path) -> Result<()>;

    /// Retourne le nom du backend
    fn name(&self) -> &str;
}
