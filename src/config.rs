// =============================================================================
// CONFIG — Paramètres explicites du crosswalk
// =============================================================================
//
// Tout ce qui conditionne la correction du cœur est ici, jamais en dur :
//   - les quatre ancres (human disease + trois exclusions)
//   - les trois préfixes de vocabulaires, dans leur ordre de priorité
//   - les littéraux Mondo (catégorie, prédicat, marqueur obsolete)
//   - les littéraux OMOP ("Maps to", 'S', "Condition")
//
// Et ce qui ne concerne que les collaborateurs externes :
//   - la release Mondo à télécharger (date), l'URL de base
//   - l'arborescence des fichiers
//
// Les valeurs par défaut reproduisent exactement le run de référence.
// Un fichier YAML peut surcharger n'importe quel sous-ensemble :
//
// ```yaml
// release:
//   version: "2025-04-01"
// anchors:
//   human_disease: "MONDO:0700096"
//   excluded: ["MONDO:0042489", "MONDO:0021125", "MONDO:0021178"]
// ```
//
// =============================================================================

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::xref::{Vocabulary, VocabularyPrefix};
use crate::error::Result;

/// Configuration complète d'un run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CrosswalkConfig {
    pub release: ReleaseConfig,
    pub paths: PathsConfig,
    pub graph: GraphConfig,
    pub anchors: AnchorConfig,
    /// Préfixes reconnus ; l'ORDRE est la priorité (premier qui matche gagne)
    pub vocabularies: VocabularyList,
    pub omop: OmopConfig,
}

impl CrosswalkConfig {
    /// Charge une configuration YAML ; les clés absentes gardent leur défaut.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Charge une configuration depuis un fichier YAML.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

/// Release Mondo KGX à récupérer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Date de release au format YYYY-MM-DD
    pub version: String,
    pub base_url: String,
    pub archive_name: String,
    pub edges_file: String,
    pub nodes_file: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            version: "2025-04-01".into(),
            base_url: "https://kg-hub.berkeleybop.io/kg-obo/mondo/".into(),
            archive_name: "mondo_kgx_tsv.tar.gz".into(),
            edges_file: "mondo_kgx_tsv_edges.tsv".into(),
            nodes_file: "mondo_kgx_tsv_nodes.tsv".into(),
        }
    }
}

/// Arborescence des données.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    /// Délimiteur de toutes les tables (les fichiers OMOP ".csv" sont tabulés)
    pub delimiter: char,
    pub concept_file: String,
    pub concept_relationship_file: String,
    pub output_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            data_dir: PathBuf::from("data"),
            delimiter: '\t',
            concept_file: "CONCEPT.csv".into(),
            concept_relationship_file: "CONCEPT_RELATIONSHIP.csv".into(),
            output_file: "MONDO2OMOP.tsv".into(),
        }
    }
}

impl PathsConfig {
    pub fn mondo_dir(&self) -> PathBuf {
        self.data_dir.join("mondo")
    }

    pub fn omop_dir(&self) -> PathBuf {
        self.data_dir.join("omop")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join("mondo2omop")
    }

    pub fn concept_path(&self) -> PathBuf {
        self.omop_dir().join(&self.concept_file)
    }

    pub fn concept_relationship_path(&self) -> PathBuf {
        self.omop_dir().join(&self.concept_relationship_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir().join(&self.output_file)
    }
}

/// Littéraux Mondo utilisés pour construire le graphe des maladies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub disease_category: String,
    pub subclass_predicate: String,
    pub obsolete_marker: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            disease_category: "biolink:Disease".into(),
            subclass_predicate: "biolink:subclass_of".into(),
            obsolete_marker: "obsolete".into(),
        }
    }
}

/// Les ancres du filtre des descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Racine "human disease"
    pub human_disease: String,
    /// Racines exclues : disease susceptibility, disease characteristic, injury
    pub excluded: Vec<String>,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        AnchorConfig {
            human_disease: "MONDO:0700096".into(),
            excluded: vec![
                "MONDO:0042489".into(),
                "MONDO:0021125".into(),
                "MONDO:0021178".into(),
            ],
        }
    }
}

/// Liste ordonnée des préfixes de vocabulaires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyList(pub Vec<VocabularyPrefix>);

impl Default for VocabularyList {
    fn default() -> Self {
        VocabularyList(vec![
            VocabularyPrefix::new(Vocabulary::Snomed, "http://identifiers.org/snomedct/"),
            VocabularyPrefix::new(Vocabulary::Mesh, "http://identifiers.org/mesh/"),
            VocabularyPrefix::new(
                Vocabulary::Icd10cm,
                "http://purl.bioontology.org/ontology/ICD10CM/",
            ),
        ])
    }
}

impl VocabularyList {
    pub fn as_slice(&self) -> &[VocabularyPrefix] {
        &self.0
    }
}

/// Littéraux OMOP utilisés par le ConceptMapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmopConfig {
    pub maps_to: String,
    pub standard_flag: String,
    pub condition_domain: String,
}

impl Default for OmopConfig {
    fn default() -> Self {
        OmopConfig {
            maps_to: "Maps to".into(),
            standard_flag: "S".into(),
            condition_domain: "Condition".into(),
        }
    }
}
