// =============================================================================
// MODEL — Les enregistrements typés décodés des tables d'entrée
// =============================================================================
//
// Une Table est une grille de Value sans sens métier. Avant d'entrer dans le
// pipeline, chaque table est validée UNE fois (Record::validate, pour les
// quatre tables avant tout décodage) puis décodée en enregistrements :
//
//   edges                → OntologyEdge        (subject --predicate--> object)
//   nodes                → OntologyNode        (terme Mondo)
//   CONCEPT              → VocabularyConcept   (concept OMOP)
//   CONCEPT_RELATIONSHIP → ConceptRelationship (concept_id_1 --relation--> concept_id_2)
//
// Le décodage conserve l'ordre des lignes : c'est ce qui rend la sortie du
// pipeline déterministe.
//
// =============================================================================

use crate::error::Result;
use super::schema::{
    concept_relationship_schema, concept_schema, edges_schema, nodes_schema, TableSchema,
};
use super::table::Table;
use super::validate::{optional_text, required_integer, text_or_empty, validate_table};

/// Un enregistrement décodable depuis une ligne de table.
pub trait Record: Sized {
    /// Le contrat de colonnes de la table source
    fn schema() -> TableSchema;

    /// Décode une ligne (la table a déjà été validée)
    fn from_row(table: &Table, row: usize) -> Result<Self>;

    /// Vérifie les colonnes obligatoires de la table source.
    fn validate(table: &Table) -> Result<()> {
        validate_table(table, &Self::schema())
    }

    /// Décode toutes les lignes d'une table validée, dans l'ordre.
    fn from_table(table: &Table) -> Result<Vec<Self>> {
        (0..table.len()).map(|row| Self::from_row(table, row)).collect()
    }
}

/// Un terme de l'ontologie Mondo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyNode {
    pub id: String,
    pub category: String,
    pub name: String,
    pub description: String,
    /// Codes externes, séparés par '|'
    pub same_as: Option<String>,
    /// Étiquettes de sous-ensembles, séparées par '|'
    pub subsets: Option<String>,
}

impl Record for OntologyNode {
    fn schema() -> TableSchema {
        nodes_schema()
    }

    fn from_row(table: &Table, row: usize) -> Result<Self> {
        Ok(OntologyNode {
            id: text_or_empty(table, row, "id"),
            category: text_or_empty(table, row, "category"),
            name: text_or_empty(table, row, "name"),
            description: text_or_empty(table, row, "description"),
            same_as: optional_text(table, row, "same_as"),
            subsets: optional_text(table, row, "subsets"),
        })
    }
}

/// Une relation orientée entre deux termes : subject --predicate--> object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyEdge {
    pub subject: String,
    pub object: String,
    pub predicate: String,
}

impl OntologyEdge {
    pub fn new(subject: &str, object: &str, predicate: &str) -> Self {
        OntologyEdge {
            subject: subject.to_string(),
            object: object.to_string(),
            predicate: predicate.to_string(),
        }
    }
}

impl Record for OntologyEdge {
    fn schema() -> TableSchema {
        edges_schema()
    }

    fn from_row(table: &Table, row: usize) -> Result<Self> {
        Ok(OntologyEdge {
            subject: text_or_empty(table, row, "subject"),
            object: text_or_empty(table, row, "object"),
            predicate: text_or_empty(table, row, "predicate"),
        })
    }
}

/// Un concept du vocabulaire OMOP (table CONCEPT).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyConcept {
    pub concept_id: i64,
    pub concept_name: String,
    pub domain_id: String,
    pub vocabulary_id: String,
    /// Marqueur "standard" OMOP ('S' pour un concept standard, vide sinon)
    pub standard_concept: Option<String>,
    pub concept_code: String,
    pub concept_class_id: Option<String>,
    pub valid_start_date: Option<String>,
    pub valid_end_date: Option<String>,
    pub invalid_reason: Option<String>,
}

impl VocabularyConcept {
    /// Le concept porte-t-il le marqueur standard donné ?
    pub fn is_standard(&self, flag: &str) -> bool {
        self.standard_concept.as_deref() == Some(flag)
    }
}

impl Record for VocabularyConcept {
    fn schema() -> TableSchema {
        concept_schema()
    }

    fn from_row(table: &Table, row: usize) -> Result<Self> {
        Ok(VocabularyConcept {
            concept_id: required_integer(table, row, "concept_id")?,
            concept_name: text_or_empty(table, row, "concept_name"),
            domain_id: text_or_empty(table, row, "domain_id"),
            vocabulary_id: text_or_empty(table, row, "vocabulary_id"),
            standard_concept: optional_text(table, row, "standard_concept"),
            concept_code: text_or_empty(table, row, "concept_code"),
            concept_class_id: optional_text(table, row, "concept_class_id"),
            valid_start_date: optional_text(table, row, "valid_start_date"),
            valid_end_date: optional_text(table, row, "valid_end_date"),
            invalid_reason: optional_text(table, row, "invalid_reason"),
        })
    }
}

/// Une relation orientée entre deux concepts OMOP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptRelationship {
    pub concept_id_1: i64,
    pub concept_id_2: i64,
    pub relationship_id: String,
}

impl ConceptRelationship {
    pub fn new(concept_id_1: i64, concept_id_2: i64, relationship_id: &str) -> Self {
        ConceptRelationship {
            concept_id_1,
            concept_id_2,
            relationship_id: relationship_id.to_string(),
        }
    }
}

impl Record for ConceptRelationship {
    fn schema() -> TableSchema {
        concept_relationship_schema()
    }

    fn from_row(table: &Table, row: usize) -> Result<Self> {
        Ok(ConceptRelationship {
            concept_id_1: required_integer(table, row, "concept_id_1")?,
            concept_id_2: required_integer(table, row, "concept_id_2")?,
            relationship_id: text_or_empty(table, row, "relationship_id"),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrosswalkError;

    #[test]
    fn test_decode_nodes() {
        let table = Table::from_text(
            "nodes",
            &["id", "category", "name", "description", "same_as", "subsets", "provided_by"],
            &[
                vec!["MONDO:1", "biolink:Disease", "flu", "", "http://identifiers.org/mesh/D1", "rare", "x"],
                vec!["MONDO:2", "biolink:Disease", "cold", "common", "", "", ""],
            ],
        );
        let nodes = OntologyNode::from_table(&table).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].same_as.as_deref(), Some("http://identifiers.org/mesh/D1"));
        assert_eq!(nodes[0].description, "");
        assert_eq!(nodes[1].same_as, None);
        assert_eq!(nodes[1].subsets, None);
    }

    #[test]
    fn test_decode_concepts_optional_columns_absent() {
        let table = Table::from_text(
            "concept",
            &["concept_id", "concept_name", "domain_id", "vocabulary_id", "standard_concept", "concept_code"],
            &[vec!["200", "Influenza", "Condition", "SNOMED", "S", "6142004"]],
        );
        let concepts = VocabularyConcept::from_table(&table).unwrap();
        assert_eq!(concepts[0].concept_id, 200);
        assert!(concepts[0].is_standard("S"));
        assert_eq!(concepts[0].concept_class_id, None);
    }

    #[test]
    fn test_decode_relationship_bad_id() {
        let table = Table::from_text(
            "concept_relationship",
            &["concept_id_1", "concept_id_2", "relationship_id"],
            &[vec!["100", "oops", "Maps to"]],
        );
        assert!(matches!(
            ConceptRelationship::from_table(&table),
            Err(CrosswalkError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_reports_missing_columns() {
        let table = Table::from_text("edges", &["subject", "object"], &[vec!["a", "b"]]);
        match OntologyEdge::validate(&table) {
            Err(CrosswalkError::MissingColumns { table, columns }) => {
                assert_eq!(table, "edges");
                assert_eq!(columns, vec!["predicate"]);
            }
            other => panic!("MissingColumns attendue, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_from_table_only_decodes() {
        // la validation est une étape à part : le décodage seul lit une
        // colonne absente comme une cellule vide
        let table = Table::from_text("edges", &["subject", "object"], &[vec!["a", "b"]]);
        let edges = OntologyEdge::from_table(&table).unwrap();
        assert_eq!(edges, vec![OntologyEdge::new("a", "b", "")]);
    }
}
