// =============================================================================
// CORE — Module principal du cœur du crosswalk
// =============================================================================
//
// Ce module regroupe toute la logique pure du crosswalk Mondo → OMOP :
// pas de fichier, pas de réseau. Il reçoit des tables en mémoire et rend
// une table en mémoire.
//
// Architecture :
//   typeside    → les valeurs de cellule et leurs types (String, Int, Bool)
//   schema      → le contrat de colonnes des tables (= le "moule")
//   table       → les données concrètes, colonnes nommées
//   validate    → la vérification des tables contre leur schéma
//   model       → les enregistrements typés (nœud, arête, concept, relation)
//   graph       → GraphBuilder et le parcours des descendants
//   descendants → DescendantFilter (ancres incluses / exclues)
//   xref        → CrossReferenceExtractor (same_as → code + vocabulaire)
//   subsets     → SubsetAnnotator (six drapeaux "rare")
//   join        → jointures d'égalité en mémoire (interne, gauche)
//   concept_map → ConceptMapper (trois jointures vers le concept standard)
//   assemble    → OutputAssembler (la table finale)
//   pipeline    → l'enchaînement complet + PipelineReport
//
// =============================================================================

pub mod typeside;
pub mod schema;
pub mod table;
pub mod validate;
pub mod model;
pub mod graph;
pub mod descendants;
pub mod xref;
pub mod subsets;
pub mod join;
pub mod concept_map;
pub mod assemble;
pub mod pipeline;
