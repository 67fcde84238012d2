// =============================================================================
// SCHEMA — Le contrat de colonnes des tables du pipeline
// =============================================================================
//
// Le cœur ne connaît pas les fichiers : il reçoit des Table déjà chargées.
// Le SEUL contrat avec le lecteur est "une table avec des colonnes nommées".
// Un TableSchema décrit ce contrat :
//   - les colonnes OBLIGATOIRES (absentes → erreur fatale, SchemaError)
//   - les colonnes OPTIONNELLES (absentes → valeurs Null)
//   - le type déclaré de chaque colonne
//
// Les colonnes supplémentaires d'une table sont tolérées et ignorées.
//
// EXEMPLE (table des arêtes Mondo KGX) :
//
//   schema edges = {
//       subject   : String   (obligatoire)
//       object    : String   (obligatoire)
//       predicate : String   (obligatoire)
//   }
//
// =============================================================================

use super::typeside::BaseType;

/// Une colonne déclarée d'un schéma de table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub name: String,
    pub ty: BaseType,
    pub required: bool,
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.required { "" } else { "?" };
        write!(f, "{}{} : {}", self.name, marker, self.ty)
    }
}

/// Le schéma d'une table : nom + colonnes ordonnées.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Crée un schéma vide
    pub fn new(name: &str) -> Self {
        TableSchema {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Ajoute une colonne obligatoire
    pub fn add_column(&mut self, name: &str, ty: BaseType) -> &mut Self {
        self.push(name, ty, true)
    }

    /// Ajoute une colonne optionnelle
    pub fn add_optional(&mut self, name: &str, ty: BaseType) -> &mut Self {
        self.push(name, ty, false)
    }

    fn push(&mut self, name: &str, ty: BaseType, required: bool) -> &mut Self {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == name) {
            existing.ty = ty;
            existing.required = required;
        } else {
            self.columns.push(Column { name: name.to_string(), ty, required });
        }
        self
    }

    /// Retourne la colonne déclarée de ce nom
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Colonnes obligatoires
    pub fn required_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.required).collect()
    }

    /// Noms de toutes les colonnes, dans l'ordre de déclaration
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

impl std::fmt::Display for TableSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "schema {} = {{", self.name)?;
        for column in &self.columns {
            writeln!(f, "    {}", column)?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// Les schémas fixes du crosswalk
// =============================================================================

/// Table des arêtes Mondo KGX.
pub fn edges_schema() -> TableSchema {
    let mut s = TableSchema::new("edges");
    s.add_column("subject", BaseType::String)
     .add_column("object", BaseType::String)
     .add_column("predicate", BaseType::String);
    s
}

/// Table des nœuds Mondo KGX.
pub fn nodes_schema() -> TableSchema {
    let mut s = TableSchema::new("nodes");
    s.add_column("id", BaseType::String)
     .add_column("category", BaseType::String)
     .add_column("name", BaseType::String)
     .add_column("description", BaseType::String)
     .add_column("same_as", BaseType::String)
     .add_column("subsets", BaseType::String);
    s
}

/// Table OMOP CONCEPT.
///
/// Les attributs de concept au-delà des six colonnes du contrat sont
/// optionnels : ils sont recopiés dans la sortie s'ils existent.
pub fn concept_schema() -> TableSchema {
    let mut s = TableSchema::new("concept");
    s.add_column("concept_id", BaseType::Integer)
     .add_column("concept_name", BaseType::String)
     .add_column("domain_id", BaseType::String)
     .add_column("vocabulary_id", BaseType::String)
     .add_column("standard_concept", BaseType::String)
     .add_column("concept_code", BaseType::String)
     .add_optional("concept_class_id", BaseType::String)
     .add_optional("valid_start_date", BaseType::String)
     .add_optional("valid_end_date", BaseType::String)
     .add_optional("invalid_reason", BaseType::String);
    s
}

/// Table OMOP CONCEPT_RELATIONSHIP.
pub fn concept_relationship_schema() -> TableSchema {
    let mut s = TableSchema::new("concept_relationship");
    s.add_column("concept_id_1", BaseType::Integer)
     .add_column("concept_id_2", BaseType::Integer)
     .add_column("relationship_id", BaseType::String);
    s
}

/// Table de sortie : le crosswalk Mondo → OMOP.
pub fn crosswalk_schema() -> TableSchema {
    let mut s = TableSchema::new("mondo2omop");
    for name in ["id", "name", "description", "category", "same_as", "vocabulary_id", "concept_code"] {
        s.add_column(name, BaseType::String);
    }
    s.add_column("concept_id", BaseType::Integer);
    for name in [
        "concept_name",
        "domain_id",
        "concept_class_id",
        "standard_concept",
        "valid_start_date",
        "valid_end_date",
        "invalid_reason",
        "relationship_id",
    ] {
        s.add_column(name, BaseType::String);
    }
    s.add_column("standard_concept_id", BaseType::Integer);
    for name in [
        "standard_concept_name",
        "standard_vocabulary_id",
        "standard_domain_id",
        "standard_concept_code",
    ] {
        s.add_column(name, BaseType::String);
    }
    for tag in super::subsets::SubsetTag::ALL {
        s.add_column(tag.as_str(), BaseType::Integer);
    }
    s
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_schema() {
        let s = edges_schema();
        assert_eq!(s.columns.len(), 3);
        assert_eq!(s.required_columns().len(), 3);
        assert!(s.column("predicate").is_some());
    }

    #[test]
    fn test_optional_columns() {
        let s = concept_schema();
        assert_eq!(s.required_columns().len(), 6);
        assert!(!s.column("invalid_reason").map(|c| c.required).unwrap_or(true));
    }

    #[test]
    fn test_redeclare_column_replaces() {
        let mut s = TableSchema::new("t");
        s.add_column("a", BaseType::String).add_optional("a", BaseType::Integer);
        assert_eq!(s.columns.len(), 1);
        assert_eq!(s.columns[0].ty, BaseType::Integer);
        assert!(!s.columns[0].required);
    }

    #[test]
    fn test_crosswalk_schema_ends_with_flags() {
        let names = crosswalk_schema().column_names();
        assert_eq!(names.first().map(String::as_str), Some("id"));
        assert_eq!(
            &names[names.len() - 6..],
            &["rare", "gard_rare", "nord_rare", "orphanet_rare", "inferred_rare", "mondo_rare"]
        );
    }

    #[test]
    fn test_crosswalk_flags_are_integer_columns() {
        let s = crosswalk_schema();
        for tag in crate::core::subsets::SubsetTag::ALL {
            assert_eq!(s.column(tag.as_str()).map(|c| c.ty), Some(BaseType::Integer));
        }
    }

    #[test]
    fn test_display() {
        let display = format!("{}", edges_schema());
        assert!(display.contains("subject : String"));
    }
}
