// =============================================================================
// Scénarios de bout en bout du crosswalk Mondo → OMOP
// =============================================================================
//
// Chaque test construit un petit jeu de tables KGX + OMOP en mémoire, exécute
// pipeline::run avec la configuration par défaut et inspecte la table de
// sortie et le PipelineReport.
//
// =============================================================================

use mondo2omop::backend::tsv::TsvBackend;
use mondo2omop::backend::TableBackend;
use mondo2omop::config::CrosswalkConfig;
use mondo2omop::core::pipeline::{run, CrosswalkInputs, CrosswalkOutput};
use mondo2omop::core::table::Table;
use mondo2omop::core::typeside::Value;
use mondo2omop::error::CrosswalkError;

const HUMAN: &str = "MONDO:0700096";
const SUSCEPTIBILITY: &str = "MONDO:0042489";
const SNOMED: &str = "http://identifiers.org/snomedct/";
const MESH: &str = "http://identifiers.org/mesh/";

const EDGE_COLUMNS: [&str; 3] = ["subject", "object", "predicate"];
const NODE_COLUMNS: [&str; 6] = ["id", "category", "name", "description", "same_as", "subsets"];
const CONCEPT_COLUMNS: [&str; 6] = [
    "concept_id",
    "concept_name",
    "domain_id",
    "vocabulary_id",
    "standard_concept",
    "concept_code",
];
const RELATIONSHIP_COLUMNS: [&str; 3] = ["concept_id_1", "concept_id_2", "relationship_id"];

/// Constructeur de jeux de tables d'entrée.
#[derive(Default)]
struct Fixture {
    edges: Vec<Vec<String>>,
    nodes: Vec<Vec<String>>,
    concepts: Vec<Vec<String>>,
    relationships: Vec<Vec<String>>,
}

impl Fixture {
    /// Les ancres sont des nœuds Disease comme les autres.
    fn new() -> Self {
        let mut f = Fixture::default();
        f.disease(HUMAN, "", "").disease(SUSCEPTIBILITY, "", "");
        f
    }

    fn subclass(&mut self, child: &str, parent: &str) -> &mut Self {
        self.edges.push(vec![child.into(), parent.into(), "biolink:subclass_of".into()]);
        self
    }

    fn disease(&mut self, id: &str, same_as: &str, subsets: &str) -> &mut Self {
        self.nodes.push(vec![
            id.into(),
            "biolink:Disease".into(),
            format!("disease {}", id),
            String::new(),
            same_as.into(),
            subsets.into(),
        ]);
        self
    }

    fn concept(&mut self, id: i64, code: &str, vocabulary: &str, domain: &str, standard: &str) -> &mut Self {
        self.concepts.push(vec![
            id.to_string(),
            format!("concept {}", id),
            domain.into(),
            vocabulary.into(),
            standard.into(),
            code.into(),
        ]);
        self
    }

    fn maps_to(&mut self, from: i64, to: i64) -> &mut Self {
        self.relationships.push(vec![from.to_string(), to.to_string(), "Maps to".into()]);
        self
    }

    fn inputs(&self) -> CrosswalkInputs {
        CrosswalkInputs {
            edges: table("edges", &EDGE_COLUMNS, &self.edges),
            nodes: table("nodes", &NODE_COLUMNS, &self.nodes),
            concepts: table("concept", &CONCEPT_COLUMNS, &self.concepts),
            relationships: table("concept_relationship", &RELATIONSHIP_COLUMNS, &self.relationships),
        }
    }

    fn run(&self) -> CrosswalkOutput {
        run(&self.inputs(), &CrosswalkConfig::default()).unwrap()
    }
}

fn table(name: &str, columns: &[&str], rows: &[Vec<String>]) -> Table {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    Table::from_text(name, columns, &rows)
}

fn column(table: &Table, name: &str) -> Vec<String> {
    (0..table.len()).map(|row| table.get(row, name).to_cell()).collect()
}

/// Un terme sous human disease avec un code SNOMED qui se résout vers 200.
fn mapped_fixture() -> Fixture {
    let mut f = Fixture::new();
    f.subclass("N", HUMAN)
        .disease("N", &format!("{}12345", SNOMED), "")
        .concept(100, "12345", "SNOMED", "Condition", "")
        .concept(200, "999", "SNOMED", "Condition", "S")
        .maps_to(100, 200);
    f
}

#[test]
fn test_susceptibility_subtree_excluded() {
    // human → A, human → B → C, susceptibility → B
    let mut f = Fixture::new();
    f.subclass("A", HUMAN)
        .subclass("B", HUMAN)
        .subclass("C", "B")
        .subclass("B", SUSCEPTIBILITY)
        .concept(200, "999", "SNOMED", "Condition", "S")
        .maps_to(200, 200);
    for id in ["A", "B", "C"] {
        f.disease(id, &format!("{}999", SNOMED), "");
    }

    let output = f.run();
    // C descend de susceptibility par B : exclu avec lui
    assert_eq!(column(&output.table, "id"), vec!["A"]);
    assert_eq!(output.report.qualifying_nodes, 1);
}

#[test]
fn test_two_cross_references_from_same_as() {
    let mut f = Fixture::new();
    f.subclass("N", HUMAN)
        .disease("N", &format!("{}12345|{}67890", SNOMED, MESH), "")
        .concept(100, "12345", "SNOMED", "Condition", "")
        .concept(101, "67890", "MeSH", "Condition", "")
        .concept(200, "999", "SNOMED", "Condition", "S")
        .maps_to(100, 200)
        .maps_to(101, 200);

    let output = f.run();
    assert_eq!(output.report.cross_references, 2);
    assert_eq!(column(&output.table, "vocabulary_id"), vec!["SNOMED", "MeSH"]);
    assert_eq!(column(&output.table, "concept_code"), vec!["12345", "67890"]);
    assert_eq!(
        column(&output.table, "same_as"),
        vec![format!("{}12345", SNOMED), format!("{}67890", MESH)]
    );
}

#[test]
fn test_subset_flags_in_output() {
    let mut f = Fixture::new();
    f.subclass("N", HUMAN)
        .disease("N", &format!("{}12345", SNOMED), "rare|gard_rare")
        .concept(100, "12345", "SNOMED", "Condition", "")
        .concept(200, "999", "SNOMED", "Condition", "S")
        .maps_to(100, 200);

    let output = f.run();
    let flags: Vec<String> = ["rare", "gard_rare", "nord_rare", "orphanet_rare", "inferred_rare", "mondo_rare"]
        .iter()
        .map(|tag| output.table.get(0, tag).to_cell())
        .collect();
    assert_eq!(flags, vec!["1", "1", "0", "0", "0", "0"]);
}

#[test]
fn test_single_standard_mapping() {
    let output = mapped_fixture().run();
    assert_eq!(output.table.len(), 1);
    assert_eq!(output.table.get(0, "concept_id"), &Value::Integer(100));
    assert_eq!(output.table.get(0, "standard_concept_id"), &Value::Integer(200));
    assert_eq!(output.table.get_str(0, "standard_domain_id"), Some("Condition"));
    assert_eq!(output.table.get_str(0, "relationship_id"), Some("Maps to"));
}

#[test]
fn test_procedure_target_yields_no_row() {
    let mut f = Fixture::new();
    f.subclass("N", HUMAN)
        .disease("N", &format!("{}12345", SNOMED), "rare")
        .concept(100, "12345", "SNOMED", "Condition", "")
        .concept(200, "999", "SNOMED", "Procedure", "S")
        .maps_to(100, 200);

    let output = f.run();
    assert!(output.table.is_empty());
    // perdu à la troisième jointure
    let standard = &output.report.joins[2];
    assert_eq!(standard.left_rows, 1);
    assert_eq!(standard.dropped(), 1);
}

#[test]
fn test_node_without_codes_absent_from_output() {
    let mut f = mapped_fixture();
    f.subclass("EMPTY", HUMAN).disease("EMPTY", "", "");

    let output = f.run();
    assert_eq!(output.report.qualifying_nodes, 2);
    assert_eq!(column(&output.table, "id"), vec!["N"]);
}

#[test]
fn test_obsolete_and_non_disease_terms_skipped() {
    let mut f = mapped_fixture();
    f.subclass("OBS", HUMAN);
    f.nodes.push(vec![
        "OBS".into(),
        "biolink:Disease".into(),
        "obsolete influenza".into(),
        String::new(),
        format!("{}12345", SNOMED),
        String::new(),
    ]);
    f.subclass("GENE", HUMAN);
    f.nodes.push(vec![
        "GENE".into(),
        "biolink:Gene".into(),
        "some gene".into(),
        String::new(),
        format!("{}12345", SNOMED),
        String::new(),
    ]);

    let output = f.run();
    assert_eq!(column(&output.table, "id"), vec!["N"]);
}

#[test]
fn test_missing_anchor_is_recovered() {
    let output = mapped_fixture().run();
    // aucune ancre exclue n'a d'arête de sous-classe dans ce graphe
    assert_eq!(
        output.report.missing_anchors,
        vec![SUSCEPTIBILITY, "MONDO:0021125", "MONDO:0021178"]
    );
    assert_eq!(output.table.len(), 1);
}

#[test]
fn test_run_is_idempotent() {
    let mut f = mapped_fixture();
    f.subclass("M", "N")
        .disease("M", &format!("{}12345|{}D1", SNOMED, MESH), "mondo_rare")
        .concept(101, "D1", "MeSH", "Condition", "")
        .concept(201, "888", "SNOMED", "Condition", "S")
        .maps_to(101, 201)
        .maps_to(100, 201);

    let inputs = f.inputs();
    let config = CrosswalkConfig::default();
    let first = run(&inputs, &config).unwrap();
    let second = run(&inputs, &config).unwrap();
    assert_eq!(first.table, second.table);
    assert_eq!(first.report, second.report);
    assert_eq!(first.table.len(), 5);
}

#[test]
fn test_missing_concept_column_aborts() {
    let mut inputs = mapped_fixture().inputs();
    inputs.concepts = table(
        "concept",
        &["concept_id", "concept_name", "domain_id", "vocabulary_id", "standard_concept"],
        &[],
    );
    match run(&inputs, &CrosswalkConfig::default()) {
        Err(CrosswalkError::MissingColumns { table, columns }) => {
            assert_eq!(table, "concept");
            assert_eq!(columns, vec!["concept_code"]);
        }
        Err(other) => panic!("SchemaError attendue, obtenu {}", other),
        Ok(_) => panic!("SchemaError attendue"),
    }
}

#[test]
fn test_non_integer_concept_id_aborts() {
    let mut f = mapped_fixture();
    f.concepts.push(vec![
        "abc".into(),
        "bad".into(),
        "Condition".into(),
        "SNOMED".into(),
        String::new(),
        "1".into(),
    ]);
    let err = run(&f.inputs(), &CrosswalkConfig::default()).err();
    assert!(matches!(err, Some(CrosswalkError::InvalidValue { .. })));
}

#[test]
fn test_tsv_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let backend = TsvBackend::tab();
    let inputs = mapped_fixture().inputs();

    for t in [&inputs.edges, &inputs.nodes, &inputs.concepts, &inputs.relationships] {
        backend.write_table(t, &dir.path().join(format!("{}.tsv", t.name))).unwrap();
    }
    let read = |name: &str| backend.read_table(name, &dir.path().join(format!("{}.tsv", name))).unwrap();
    let loaded = CrosswalkInputs {
        edges: read("edges"),
        nodes: read("nodes"),
        concepts: read("concept"),
        relationships: read("concept_relationship"),
    };

    let output = run(&loaded, &CrosswalkConfig::default()).unwrap();
    let out_path = dir.path().join("MONDO2OMOP.tsv");
    backend.write_table(&output.table, &out_path).unwrap();

    let written = backend.read_table("mondo2omop", &out_path).unwrap();
    assert_eq!(written.columns, output.table.columns);
    assert_eq!(written.len(), 1);
    assert_eq!(written.get_str(0, "id"), Some("N"));
    assert_eq!(written.get_str(0, "standard_concept_id"), Some("200"));
    assert_eq!(written.get_str(0, "rare"), Some("0"));
    assert!(written.get(0, "invalid_reason").is_null());
}
