// =============================================================================
// XREF — Extraction des références croisées (champ same_as)
// =============================================================================
//
// Le champ same_as d'un terme Mondo liste ses équivalents externes :
//
//   http://identifiers.org/snomedct/6142004|http://identifiers.org/mesh/D007251|...
//
// On découpe sur '|', on ne garde que les candidats portant un des trois
// préfixes reconnus, et on produit des paires normalisées (code, vocabulaire) :
//
//   (6142004, SNOMED), (D007251, MeSH)
//
// POLITIQUE DE PRIORITÉ : les préfixes sont testés dans l'ordre configuré
// (SNOMED, puis MeSH, puis ICD10CM) et le PREMIER qui apparaît dans le
// candidat donne le vocabulaire. Un candidat qui contiendrait deux préfixes
// est donc étiqueté selon cet ordre, et non selon sa position dans la chaîne.
//
// NORMALISATION : le code est le candidat privé de TOUTES les occurrences de
// TOUS les préfixes reconnus. Aucun code produit ne contient de préfixe.
//
// Un candidat sans préfixe reconnu est écarté silencieusement (compté).
//
// =============================================================================

use std::fmt;
use serde::{Deserialize, Serialize};
use super::model::OntologyNode;

/// Les vocabulaires cibles reconnus (ensemble fermé).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vocabulary {
    #[serde(rename = "SNOMED")]
    Snomed,
    #[serde(rename = "MeSH")]
    Mesh,
    #[serde(rename = "ICD10CM")]
    Icd10cm,
}

impl Vocabulary {
    /// L'identifiant de vocabulaire OMOP (colonne vocabulary_id de CONCEPT)
    pub fn vocabulary_id(&self) -> &'static str {
        match self {
            Vocabulary::Snomed => "SNOMED",
            Vocabulary::Mesh => "MeSH",
            Vocabulary::Icd10cm => "ICD10CM",
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vocabulary_id())
    }
}

/// Un préfixe d'URI reconnu et son vocabulaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyPrefix {
    pub vocabulary: Vocabulary,
    pub prefix: String,
}

impl VocabularyPrefix {
    pub fn new(vocabulary: Vocabulary, prefix: &str) -> Self {
        VocabularyPrefix {
            vocabulary,
            prefix: prefix.to_string(),
        }
    }
}

/// Une référence croisée normalisée d'un terme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrossReference {
    pub node_id: String,
    pub vocabulary: Vocabulary,
    /// Code sans préfixe, ex: "6142004"
    pub code: String,
    /// Le candidat brut dont le code est issu
    pub same_as: String,
}

/// Résultat de l'extraction sur un ensemble de nœuds.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub cross_references: Vec<CrossReference>,
    /// Candidats sans préfixe reconnu (écartés)
    pub unrecognized: usize,
}

/// Étiquette un candidat : premier préfixe présent, dans l'ordre de priorité.
pub fn classify(candidate: &str, prefixes: &[VocabularyPrefix]) -> Option<Vocabulary> {
    prefixes
        .iter()
        .find(|p| !p.prefix.is_empty() && candidate.contains(p.prefix.as_str()))
        .map(|p| p.vocabulary)
}

/// Retire toutes les occurrences de tous les préfixes reconnus.
pub fn normalize_code(candidate: &str, prefixes: &[VocabularyPrefix]) -> String {
    let mut code = candidate.to_string();
    // Un retrait peut recoller les morceaux d'un autre préfixe : on itère
    // jusqu'à ce qu'aucun préfixe ne subsiste.
    loop {
        let before = code.len();
        for p in prefixes.iter().filter(|p| !p.prefix.is_empty()) {
            code = code.replace(p.prefix.as_str(), "");
        }
        if code.len() == before {
            return code;
        }
    }
}

/// CrossReferenceExtractor : les références croisées d'un nœud.
///
/// Retourne aussi le nombre de candidats écartés.
pub fn extract(node: &OntologyNode, prefixes: &[VocabularyPrefix]) -> (Vec<CrossReference>, usize) {
    let Some(same_as) = node.same_as.as_deref() else {
        return (Vec::new(), 0);
    };

    let mut refs = Vec::new();
    let mut unrecognized = 0usize;
    for candidate in same_as.split('|').filter(|c| !c.is_empty()) {
        match classify(candidate, prefixes) {
            Some(vocabulary) => refs.push(CrossReference {
                node_id: node.id.clone(),
                vocabulary,
                code: normalize_code(candidate, prefixes),
                same_as: candidate.to_string(),
            }),
            None => unrecognized += 1,
        }
    }
    (refs, unrecognized)
}

/// Applique l'extraction à tous les nœuds qualifiants, dans l'ordre.
pub fn extract_all(nodes: &[OntologyNode], prefixes: &[VocabularyPrefix]) -> Extraction {
    let mut extraction = Extraction::default();
    for node in nodes {
        let (refs, unrecognized) = extract(node, prefixes);
        extraction.cross_references.extend(refs);
        extraction.unrecognized += unrecognized;
    }
    extraction
}
