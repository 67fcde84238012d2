// =============================================================================
// MONDO2OMOP — Crosswalk Mondo → OMOP en Rust
// =============================================================================
//
// mondo2omop relie les termes de maladie de l'ontologie Mondo aux concepts
// standard du modèle OMOP, pour harmoniser des données cliniques codées
// dans des systèmes différents.
//
// Architecture :
//   core/     → Le cœur pur : graphe des maladies, références croisées,
//               jointures vers les concepts standard (aucune E/S)
//   backend/  → Les collaborateurs d'E/S : fichiers délimités, release Mondo
//   config    → Les paramètres explicites d'un run (YAML + défauts)
//   error     → Les erreurs fatales
//
// Concepts fondamentaux :
//   Ancre       = un terme racine dont on prend (ou exclut) les descendants
//   Qualifiant  = un terme Disease, non obsolète, sous "human disease"
//   Crosswalk   = terme → référence croisée → concept source → concept standard
//
// =============================================================================

pub mod core;
pub mod backend;
pub mod config;
pub mod error;
