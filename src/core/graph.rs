// =============================================================================
// GRAPH — Le graphe "is-subclass-of" des maladies Mondo
// =============================================================================
//
// Les arêtes KGX sont orientées ENFANT → PARENT :
//
//   MONDO:0005812 (influenza) --subclass_of--> MONDO:0700096 (human disease)
//
// Pour énumérer tous les descendants d'un terme en UN SEUL parcours, on
// stocke le graphe INVERSÉ : parent → { enfants directs }.
//
//   human disease ──▶ { influenza, ... }
//   influenza     ──▶ { avian influenza, ... }
//
// Seules les arêtes utiles entrent dans le graphe :
//   - subject ET object sont des nœuds de catégorie Disease
//   - le prédicat est subclass_of
//   - aucun des deux noms ne contient le marqueur "obsolete" (sous-chaîne,
//     sensible à la casse ; le filtre par mot entier est celui du
//     DescendantFilter, sur les nœuds)
//
// En pratique Mondo est un DAG, mais une donnée réelle peut contenir un cycle
// accidentel : le parcours garde un ensemble de nœuds visités et termine
// toujours.
//
// =============================================================================

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;
use crate::config::GraphConfig;
use super::model::{OntologyEdge, OntologyNode};

/// Le graphe des maladies, stocké ancêtre → descendants directs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiseaseGraph {
    /// parent → enfants directs
    children: BTreeMap<String, BTreeSet<String>>,
    /// Tous les nœuds apparaissant dans au moins une arête retenue
    nodes: BTreeSet<String>,
    edge_count: usize,
}

impl DiseaseGraph {
    /// Crée un graphe vide
    pub fn new() -> Self {
        DiseaseGraph::default()
    }

    /// GraphBuilder : construit le graphe à partir des tables brutes.
    ///
    /// Une arête dont une extrémité n'existe pas dans la table des nœuds
    /// est ignorée (elle ne peut pas être de catégorie Disease).
    pub fn build(edges: &[OntologyEdge], nodes: &[OntologyNode], config: &GraphConfig) -> Self {
        let mut lookup: HashMap<&str, &OntologyNode> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            lookup.entry(node.id.as_str()).or_insert(node);
        }

        let is_kept = |id: &str| -> bool {
            lookup.get(id).is_some_and(|node| {
                node.category == config.disease_category
                    && !node.name.contains(&config.obsolete_marker)
            })
        };

        let mut graph = DiseaseGraph::new();
        for edge in edges {
            if edge.predicate != config.subclass_predicate {
                continue;
            }
            if !is_kept(&edge.subject) || !is_kept(&edge.object) {
                continue;
            }
            // arête inversée : object (ancêtre) → subject (enfant)
            graph.add_edge(&edge.object, &edge.subject);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graphe des maladies construit"
        );
        graph
    }

    /// Ajoute l'arête ancêtre → enfant. Une arête déjà présente est sans effet.
    pub fn add_edge(&mut self, ancestor: &str, child: &str) -> &mut Self {
        let inserted = self
            .children
            .entry(ancestor.to_string())
            .or_default()
            .insert(child.to_string());
        if inserted {
            self.edge_count += 1;
        }
        self.nodes.insert(ancestor.to_string());
        self.nodes.insert(child.to_string());
        self
    }

    /// Le nœud apparaît-il dans le graphe ?
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Enfants directs d'un nœud
    pub fn children_of(&self, id: &str) -> impl Iterator<Item = &str> {
        self.children
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Tous les descendants transitifs d'un nœud.
    ///
    /// L'ancre elle-même n'est PAS incluse, sauf si elle est ré-atteinte par
    /// un cycle. Une ancre absente du graphe donne l'ensemble vide.
    ///
    /// ALGORITHME : parcours en profondeur itératif avec ensemble de visités.
    /// On part des enfants directs (et non de l'ancre) : c'est ce qui exclut
    /// l'ancre tout en la laissant apparaître si un cycle y revient.
    pub fn descendants(&self, anchor: &str) -> BTreeSet<String> {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<&str> = self.children_of(anchor).collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.to_string()) {
                continue;
            }
            for child in self.children_of(current) {
                if !visited.contains(child) {
                    stack.push(child);
                }
            }
        }
        visited
    }
}
