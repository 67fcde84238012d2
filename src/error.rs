// =============================================================================
// ERROR — Les erreurs fatales du crosswalk
// =============================================================================
//
// Seules les erreurs qui AVORTENT le run vivent ici :
//   - une colonne obligatoire absente (SchemaError)
//   - une cellule typée illisible (ex: concept_id qui n'est pas un entier)
//   - les erreurs d'E/S des collaborateurs (fichiers, CSV, HTTP, YAML)
//
// Les situations RÉCUPÉRÉES (ancre absente, code non reconnu, lignes perdues
// dans une jointure) ne sont PAS des erreurs : elles sont comptées dans
// le PipelineReport.
//
// =============================================================================

use thiserror::Error;

/// Erreurs du pipeline Mondo → OMOP.
#[derive(Error, Debug)]
pub enum CrosswalkError {
    /// Une ou plusieurs colonnes obligatoires manquent dans une table d'entrée.
    #[error("Table '{table}' : colonnes obligatoires manquantes : {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    /// Une cellule obligatoire ne respecte pas le type déclaré de sa colonne.
    #[error("Table '{table}' ligne {row} : valeur '{value}' invalide pour la colonne '{column}' (attendu : {expected})")]
    InvalidValue {
        table: String,
        column: String,
        row: usize,
        value: String,
        expected: String,
    },

    /// Paramètre de configuration inutilisable (ex: délimiteur non ASCII).
    #[error("Configuration : {0}")]
    Config(String),

    /// Fichier attendu absent de l'archive extraite.
    #[error("Archive : {0}")]
    Archive(String),

    /// Motif de filtrage invalide (marqueur obsolete configuré).
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Résultat des opérations du crosswalk.
pub type Result<T> = std::result::Result<T, CrosswalkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display() {
        let err = CrosswalkError::MissingColumns {
            table: "nodes".into(),
            columns: vec!["same_as".into(), "subsets".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("nodes"));
        assert!(msg.contains("same_as, subsets"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = CrosswalkError::InvalidValue {
            table: "concept".into(),
            column: "concept_id".into(),
            row: 3,
            value: "abc".into(),
            expected: "Int".into(),
        };
        assert!(err.to_string().contains("concept_id"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "absent");
        let err: CrosswalkError = io_err.into();
        assert!(matches!(err, CrosswalkError::Io(_)));
    }
}
