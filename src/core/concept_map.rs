// =============================================================================
// CONCEPT_MAP — Des références croisées aux concepts standard OMOP
// =============================================================================
//
// Trois jointures INTERNES enchaînées :
//
//   CrossReference(code, vocabulaire)
//        │  ⋈ CONCEPT(concept_code, vocabulary_id)            [étape 1]
//        ▼
//   concept source (concept_id)
//        │  ⋈ CONCEPT_RELATIONSHIP(concept_id_1), "Maps to"   [étape 2]
//        ▼
//   concept cible (concept_id_2)
//        │  ⋈ CONCEPT(concept_id) standard ET domaine Condition [étape 3]
//        ▼
//   MappingRow
//
// À CHAQUE étape, une ligne sans correspondance disparaît sans bruit :
//   - code inconnu du vocabulaire OMOP        → perdu à l'étape 1
//   - concept sans relation "Maps to"         → perdu à l'étape 2
//   - cible non standard ou hors Condition    → perdu à l'étape 3
// Les trois JoinStats du résultat rendent ces pertes mesurables.
//
// CARDINALITÉ : un terme peut produire plusieurs lignes (plusieurs codes,
// ou un code qui "Maps to" plusieurs concepts standard), et un concept
// standard peut être la cible de plusieurs termes.
//
// =============================================================================

use tracing::info;
use crate::config::OmopConfig;
use super::join::{inner_join, JoinStats};
use super::model::{ConceptRelationship, VocabularyConcept};
use super::xref::CrossReference;

/// Une correspondance validée : référence croisée → concept standard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub cross_reference: CrossReference,
    /// Le concept OMOP désigné par le code (étape 1)
    pub source: VocabularyConcept,
    /// La relation suivie (toujours la relation "Maps to" configurée)
    pub relationship_id: String,
    /// Le concept standard Condition atteint (étape 3)
    pub standard: VocabularyConcept,
}

/// Résultat du ConceptMapper et comptabilité de ses trois jointures.
#[derive(Debug, Clone, Default)]
pub struct ConceptMapping {
    pub rows: Vec<MappingRow>,
    /// [concept source, "Maps to", concept standard]
    pub stages: Vec<JoinStats>,
}

/// ConceptMapper : résout les références croisées en concepts standard.
pub fn map_concepts(
    cross_references: &[CrossReference],
    concepts: &[VocabularyConcept],
    relationships: &[ConceptRelationship],
    omop: &OmopConfig,
) -> ConceptMapping {
    // Étape 1 : (code, vocabulaire) → concept source
    let (sourced, source_stats) = inner_join(
        "concept source",
        cross_references,
        concepts,
        |x| (x.code.as_str(), x.vocabulary.vocabulary_id()),
        |c| (c.concept_code.as_str(), c.vocabulary_id.as_str()),
    );

    // Étape 2 : concept source → cible via "Maps to"
    let maps_to: Vec<&ConceptRelationship> = relationships
        .iter()
        .filter(|r| r.relationship_id == omop.maps_to)
        .collect();
    let (mapped, maps_to_stats) = inner_join(
        "maps to",
        &sourced,
        &maps_to,
        |(_, source)| source.concept_id,
        |r| r.concept_id_1,
    );

    // Étape 3 : cible → concept standard du domaine Condition
    let standard: Vec<&VocabularyConcept> = concepts
        .iter()
        .filter(|c| c.is_standard(&omop.standard_flag) && c.domain_id == omop.condition_domain)
        .collect();
    let (resolved, standard_stats) = inner_join(
        "concept standard",
        &mapped,
        &standard,
        |(_, rel)| rel.concept_id_2,
        |c| c.concept_id,
    );

    let rows: Vec<MappingRow> = resolved
        .into_iter()
        .map(|(((xref, source), rel), standard)| MappingRow {
            cross_reference: CrossReference::clone(xref),
            source: VocabularyConcept::clone(source),
            relationship_id: rel.relationship_id.clone(),
            standard: VocabularyConcept::clone(standard),
        })
        .collect();

    info!(
        cross_references = cross_references.len(),
        after_concept = source_stats.output_rows,
        after_maps_to = maps_to_stats.output_rows,
        mappings = rows.len(),
        "correspondances OMOP résolues"
    );

    ConceptMapping {
        rows,
        stages: vec![source_stats, maps_to_stats, standard_stats],
    }
}
