// =============================================================================
// PIPELINE — Le crosswalk Mondo → OMOP de bout en bout
// =============================================================================
//
// Une suite de fonctions PURES, chacune prenant des entrées immuables et
// rendant un nouvel artefact :
//
//   edges, nodes ──▶ GraphBuilder ──▶ DiseaseGraph
//                                         │
//   nodes ─────────────────────▶ DescendantFilter ──▶ nœuds qualifiants
//                                                        │          │
//                                   CrossReferenceExtractor   SubsetAnnotator
//                                                        │          │
//   CONCEPT, CONCEPT_RELATIONSHIP ──▶ ConceptMapper      │          │
//                                         │              │          │
//                                         ▼              ▼          ▼
//                                         └──── OutputAssembler ────┘
//                                                     │
//                                                     ▼
//                                              Table mondo2omop
//
// Les quatre tables sont VALIDÉES avant toute étape : une colonne
// obligatoire manquante avorte le run sans rien produire.
//
// Le cœur n'écrit rien : il rend la table et un PipelineReport, et c'est à
// l'appelant d'écrire la sortie une fois le run réussi.
//
// =============================================================================

use std::fmt;
use tracing::info;
use crate::config::CrosswalkConfig;
use crate::error::Result;
use super::assemble::assemble;
use super::concept_map::map_concepts;
use super::descendants::qualifying_nodes;
use super::graph::DiseaseGraph;
use super::join::JoinStats;
use super::model::{ConceptRelationship, OntologyEdge, OntologyNode, Record, VocabularyConcept};
use super::subsets::annotate_all;
use super::table::Table;
use super::xref::extract_all;

/// Les quatre tables d'entrée, déjà chargées en mémoire.
#[derive(Debug, Clone)]
pub struct CrosswalkInputs {
    pub edges: Table,
    pub nodes: Table,
    pub concepts: Table,
    pub relationships: Table,
}

/// Ce qu'un run a conservé, écarté et récupéré, étape par étape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub rejected_candidates: usize,
    pub qualifying_nodes: usize,
    /// Ancres configurées absentes du graphe (récupéré : ensemble vide)
    pub missing_anchors: Vec<String>,
    pub cross_references: usize,
    /// Candidats same_as sans préfixe reconnu (récupéré : écartés)
    pub unrecognized_cross_references: usize,
    /// Les jointures, dans l'ordre d'exécution
    pub joins: Vec<JoinStats>,
    pub output_rows: usize,
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graphe des maladies : {} nœuds, {} arêtes", self.graph_nodes, self.graph_edges)?;
        writeln!(
            f,
            "Termes qualifiants : {} ({} candidats écartés)",
            self.qualifying_nodes, self.rejected_candidates
        )?;
        if !self.missing_anchors.is_empty() {
            writeln!(f, "Ancres absentes : {}", self.missing_anchors.join(", "))?;
        }
        writeln!(
            f,
            "Références croisées : {} ({} non reconnues)",
            self.cross_references, self.unrecognized_cross_references
        )?;
        for join in &self.joins {
            writeln!(f, "  {}", join)?;
        }
        write!(f, "Lignes produites : {}", self.output_rows)
    }
}

/// Résultat d'un run.
#[derive(Debug, Clone)]
pub struct CrosswalkOutput {
    pub table: Table,
    pub report: PipelineReport,
}

/// Exécute le crosswalk complet sur des tables en mémoire.
pub fn run(inputs: &CrosswalkInputs, config: &CrosswalkConfig) -> Result<CrosswalkOutput> {
    OntologyEdge::validate(&inputs.edges)?;
    OntologyNode::validate(&inputs.nodes)?;
    VocabularyConcept::validate(&inputs.concepts)?;
    ConceptRelationship::validate(&inputs.relationships)?;

    let edges = OntologyEdge::from_table(&inputs.edges)?;
    let nodes = OntologyNode::from_table(&inputs.nodes)?;
    let concepts = VocabularyConcept::from_table(&inputs.concepts)?;
    let relationships = ConceptRelationship::from_table(&inputs.relationships)?;
    info!(
        edges = edges.len(),
        nodes = nodes.len(),
        concepts = concepts.len(),
        relationships = relationships.len(),
        "tables d'entrée validées"
    );

    let graph = DiseaseGraph::build(&edges, &nodes, &config.graph);
    let qualification = qualifying_nodes(&nodes, &graph, &config.anchors, &config.graph)?;

    let extraction = extract_all(&qualification.nodes, config.vocabularies.as_slice());
    let flags = annotate_all(&qualification.nodes);

    let mapping = map_concepts(&extraction.cross_references, &concepts, &relationships, &config.omop);
    let assembly = assemble(&mapping.rows, &qualification.nodes, &flags);

    let mut joins = mapping.stages;
    joins.extend(assembly.stages);

    let report = PipelineReport {
        graph_nodes: graph.node_count(),
        graph_edges: graph.edge_count(),
        rejected_candidates: qualification.rejected_candidates,
        qualifying_nodes: qualification.nodes.len(),
        missing_anchors: qualification.missing_anchors,
        cross_references: extraction.cross_references.len(),
        unrecognized_cross_references: extraction.unrecognized,
        joins,
        output_rows: assembly.table.len(),
    };
    info!(output_rows = report.output_rows, "crosswalk terminé");

    Ok(CrosswalkOutput {
        table: assembly.table,
        report,
    })
}
