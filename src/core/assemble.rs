// =============================================================================
// ASSEMBLE — La table finale du crosswalk
// =============================================================================
//
// Dernière étape : chaque MappingRow devient UNE ligne de sortie, enrichie
// par deux jointures GAUCHES sur l'identifiant du terme :
//
//   MappingRow(node_id, ...)
//        │  ⟕ nœuds qualifiants(id)       → name, description, category
//        │  ⟕ drapeaux(id)                → rare, gard_rare, ...
//        ▼
//   ligne du crosswalk
//
// Jointure GAUCHE : aucune ligne de correspondance n'est perdue ici. Un
// terme sans drapeaux connus reçoit six zéros, un terme introuvable des
// attributs vides.
//
// Les colonnes suivent crosswalk_schema(), dans cet ordre :
//   terme | référence croisée | concept source | relation | concept standard | drapeaux
//
// =============================================================================

use tracing::info;
use super::concept_map::MappingRow;
use super::join::{left_join, JoinStats};
use super::model::{OntologyNode, VocabularyConcept};
use super::schema::crosswalk_schema;
use super::subsets::SubsetFlags;
use super::table::Table;
use super::typeside::Value;

/// La table de sortie et la comptabilité de ses deux jointures.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub table: Table,
    /// [attributs du terme, drapeaux]
    pub stages: Vec<JoinStats>,
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

fn optional(s: &Option<String>) -> Value {
    match s {
        Some(s) => text(s),
        None => Value::Null,
    }
}

fn node_cells(node: Option<&OntologyNode>) -> [Value; 3] {
    match node {
        Some(n) => [text(&n.name), text(&n.description), text(&n.category)],
        None => [Value::Null, Value::Null, Value::Null],
    }
}

/// Les colonnes du concept source, de concept_id à invalid_reason.
fn source_cells(c: &VocabularyConcept) -> [Value; 8] {
    [
        Value::Integer(c.concept_id),
        text(&c.concept_name),
        text(&c.domain_id),
        optional(&c.concept_class_id),
        optional(&c.standard_concept),
        optional(&c.valid_start_date),
        optional(&c.valid_end_date),
        optional(&c.invalid_reason),
    ]
}

fn standard_cells(c: &VocabularyConcept) -> [Value; 5] {
    [
        Value::Integer(c.concept_id),
        text(&c.concept_name),
        text(&c.vocabulary_id),
        text(&c.domain_id),
        text(&c.concept_code),
    ]
}

/// OutputAssembler : une ligne par (terme, référence croisée, concept standard).
pub fn assemble(
    rows: &[MappingRow],
    nodes: &[OntologyNode],
    flags: &[(String, SubsetFlags)],
) -> Assembly {
    let (described, node_stats) = left_join(
        "attributs du terme",
        rows,
        nodes,
        |r| r.cross_reference.node_id.as_str(),
        |n| n.id.as_str(),
    );
    let (flagged, flag_stats) = left_join(
        "drapeaux",
        &described,
        flags,
        |(r, _)| r.cross_reference.node_id.as_str(),
        |(id, _)| id.as_str(),
    );

    let mut table = Table::with_schema(&crosswalk_schema());
    for ((row, node), node_flags) in flagged {
        let xref = &row.cross_reference;
        let flags = node_flags.map(|(_, f)| *f).unwrap_or_default();

        let mut cells = Vec::with_capacity(table.columns.len());
        cells.push(text(&xref.node_id));
        cells.extend(node_cells(*node));
        cells.push(text(&xref.same_as));
        cells.push(text(xref.vocabulary.vocabulary_id()));
        cells.push(text(&xref.code));
        cells.extend(source_cells(&row.source));
        cells.push(text(&row.relationship_id));
        cells.extend(standard_cells(&row.standard));
        cells.extend(flags.as_bits().map(Value::Integer));
        table.push_row(cells);
    }

    info!(rows = table.len(), "table du crosswalk assemblée");

    Assembly {
        table,
        stages: vec![node_stats, flag_stats],
    }
}
