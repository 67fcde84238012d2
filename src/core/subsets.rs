// =============================================================================
// SUBSETS — Les drapeaux "maladie rare" d'un terme
// =============================================================================
//
// Le champ subsets d'un terme Mondo liste ses sous-ensembles :
//
//   rare|gard_rare|otar
//
// On en tire six drapeaux INDÉPENDANTS, un par étiquette de l'énumération
// fermée SubsetTag. Un seul passage sur le champ découpé produit tous les
// drapeaux ; ajouter une étiquette = ajouter une variante à l'énumération.
//
//   rare=1 gard_rare=1 nord_rare=0 orphanet_rare=0 inferred_rare=0 mondo_rare=0
//
// Aucune exclusivité : n'importe quelle combinaison est possible, y compris
// aucune (champ absent ou vide → tout à zéro).
//
// =============================================================================

use std::fmt;
use super::model::OntologyNode;

/// Les étiquettes de sous-ensembles "rare" reconnues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubsetTag {
    Rare,
    GardRare,
    NordRare,
    OrphanetRare,
    InferredRare,
    MondoRare,
}

impl SubsetTag {
    /// Toutes les étiquettes, dans l'ordre des colonnes de sortie
    pub const ALL: [SubsetTag; 6] = [
        SubsetTag::Rare,
        SubsetTag::GardRare,
        SubsetTag::NordRare,
        SubsetTag::OrphanetRare,
        SubsetTag::InferredRare,
        SubsetTag::MondoRare,
    ];

    /// L'étiquette telle qu'écrite dans le champ subsets (et nom de colonne)
    pub fn as_str(&self) -> &'static str {
        match self {
            SubsetTag::Rare => "rare",
            SubsetTag::GardRare => "gard_rare",
            SubsetTag::NordRare => "nord_rare",
            SubsetTag::OrphanetRare => "orphanet_rare",
            SubsetTag::InferredRare => "inferred_rare",
            SubsetTag::MondoRare => "mondo_rare",
        }
    }

    /// Étiquette correspondant exactement à un élément du champ
    pub fn parse(raw: &str) -> Option<SubsetTag> {
        SubsetTag::ALL.into_iter().find(|tag| tag.as_str() == raw)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SubsetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Les six drapeaux d'un terme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubsetFlags([bool; 6]);

impl SubsetFlags {
    /// Tous les drapeaux à zéro
    pub fn none() -> Self {
        SubsetFlags::default()
    }

    pub fn get(&self, tag: SubsetTag) -> bool {
        self.0[tag.index()]
    }

    pub fn set(&mut self, tag: SubsetTag) -> &mut Self {
        self.0[tag.index()] = true;
        self
    }

    /// Les drapeaux dans l'ordre des colonnes, en 0/1
    pub fn as_bits(&self) -> [i64; 6] {
        self.0.map(i64::from)
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&b| b)
    }
}

/// SubsetAnnotator : les drapeaux d'un nœud, en un passage sur son champ.
pub fn annotate(node: &OntologyNode) -> SubsetFlags {
    let mut flags = SubsetFlags::none();
    if let Some(subsets) = node.subsets.as_deref() {
        for tag in subsets.split('|').filter_map(SubsetTag::parse) {
            flags.set(tag);
        }
    }
    flags
}

/// Les drapeaux de tous les nœuds, (identifiant, drapeaux) dans l'ordre des nœuds.
pub fn annotate_all(nodes: &[OntologyNode]) -> Vec<(String, SubsetFlags)> {
    nodes
        .iter()
        .map(|node| (node.id.clone(), annotate(node)))
        .collect()
}
