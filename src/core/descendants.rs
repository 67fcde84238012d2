// =============================================================================
// DESCENDANTS — Le filtre des termes "human disease"
// =============================================================================
//
// Un terme Mondo est QUALIFIANT ssi :
//   1. sa catégorie est Disease
//   2. son nom ne porte pas le marqueur "obsolete" comme MOT ENTIER
//   3. il descend de l'ancre human disease
//   4. il ne descend d'AUCUNE des ancres exclues
//      (disease susceptibility, disease characteristic, injury)
//
// EXEMPLE :
//
//   human disease ──▶ A
//        │
//        └────────▶ B ──▶ C
//   susceptibility ──▶ B
//
//   descendants(human)          = { A, B, C }
//   descendants(susceptibility) = { B, C }
//   qualifiants                 = { A }
//
// L'exclusion porte sur l'ENSEMBLE des descendants de l'ancre exclue, pas
// seulement sur ses enfants directs.
//
// Une ancre absente du graphe n'est pas une erreur : son ensemble de
// descendants est vide, on le signale et on continue.
//
// =============================================================================

use std::collections::BTreeSet;
use regex::Regex;
use tracing::{info, warn};
use crate::config::{AnchorConfig, GraphConfig};
use crate::error::Result;
use super::graph::DiseaseGraph;
use super::model::OntologyNode;

/// Reconnaît un nom de terme obsolète : le marqueur comme mot entier.
///
/// "obsolete", "obsolete influenza", "influenza obsolete" → obsolète ;
/// "nonobsoletely", "obsoleted" → pas obsolète.
#[derive(Debug, Clone)]
pub struct ObsoleteMatcher {
    pattern: Regex,
}

impl ObsoleteMatcher {
    pub fn new(marker: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(marker)))?;
        Ok(ObsoleteMatcher { pattern })
    }

    pub fn is_obsolete(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Résultat du filtre : les nœuds qualifiants, dans l'ordre de la table.
#[derive(Debug, Clone, Default)]
pub struct Qualification {
    pub nodes: Vec<OntologyNode>,
    /// Ancres configurées mais absentes du graphe
    pub missing_anchors: Vec<String>,
    /// Nœuds écartés avant le parcours (catégorie ou nom obsolète)
    pub rejected_candidates: usize,
}

impl Qualification {
    pub fn ids(&self) -> BTreeSet<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }
}

/// DescendantFilter : calcule l'ensemble des termes qualifiants.
pub fn qualifying_nodes(
    nodes: &[OntologyNode],
    graph: &DiseaseGraph,
    anchors: &AnchorConfig,
    config: &GraphConfig,
) -> Result<Qualification> {
    let matcher = ObsoleteMatcher::new(&config.obsolete_marker)?;
    let mut missing_anchors = Vec::new();

    let mut anchor_descendants = |anchor: &str| -> BTreeSet<String> {
        if !graph.contains(anchor) {
            warn!(anchor, "ancre absente du graphe, ensemble de descendants vide");
            missing_anchors.push(anchor.to_string());
        }
        graph.descendants(anchor)
    };

    let included = anchor_descendants(&anchors.human_disease);
    let mut excluded: BTreeSet<String> = BTreeSet::new();
    for anchor in &anchors.excluded {
        excluded.extend(anchor_descendants(anchor));
    }

    let mut rejected_candidates = 0usize;
    let mut kept = Vec::new();
    for node in nodes {
        if node.category != config.disease_category || matcher.is_obsolete(&node.name) {
            rejected_candidates += 1;
            continue;
        }
        if included.contains(&node.id) && !excluded.contains(&node.id) {
            kept.push(node.clone());
        }
    }

    info!(
        candidates = nodes.len() - rejected_candidates,
        human_disease = included.len(),
        excluded = excluded.len(),
        qualifying = kept.len(),
        "filtre des descendants appliqué"
    );

    Ok(Qualification {
        nodes: kept,
        missing_anchors,
        rejected_candidates,
    })
}
