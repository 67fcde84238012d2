// =============================================================================
// VALIDATE — Vérification des tables d'entrée contre leur schéma
// =============================================================================
//
// Ce module vérifie que les tables reçues respectent le contrat de colonnes :
//   - toute colonne OBLIGATOIRE du schéma existe dans la table
//   - toute cellule d'une colonne typée se convertit vers son type
//
// Une violation est FATALE : le run s'arrête avant toute étape du pipeline,
// aucune sortie partielle n'est produite.
//
// =============================================================================

use crate::error::{CrosswalkError, Result};
use super::schema::TableSchema;
use super::table::Table;
use super::typeside::{BaseType, Value};

/// Vérifie que la table contient toutes les colonnes obligatoires du schéma.
///
/// Toutes les colonnes manquantes sont rapportées ensemble.
pub fn validate_table(table: &Table, schema: &TableSchema) -> Result<()> {
    let missing: Vec<String> = schema
        .required_columns()
        .into_iter()
        .filter(|column| !table.has_column(&column.name))
        .map(|column| column.name.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CrosswalkError::MissingColumns {
            table: table.name.clone(),
            columns: missing,
        })
    }
}

/// Lit une cellule et la convertit vers `ty`.
///
/// Null reste Null ; une conversion impossible est une erreur InvalidValue.
pub fn typed_cell(table: &Table, row: usize, column: &str, ty: BaseType) -> Result<Value> {
    let raw = table.get(row, column);
    raw.coerce(ty).ok_or_else(|| CrosswalkError::InvalidValue {
        table: table.name.clone(),
        column: column.to_string(),
        row,
        value: raw.to_cell(),
        expected: ty.to_string(),
    })
}

/// Lit un entier obligatoire (ex: concept_id). Null est refusé.
pub fn required_integer(table: &Table, row: usize, column: &str) -> Result<i64> {
    match typed_cell(table, row, column, BaseType::Integer)? {
        Value::Integer(i) => Ok(i),
        other => Err(CrosswalkError::InvalidValue {
            table: table.name.clone(),
            column: column.to_string(),
            row,
            value: other.to_cell(),
            expected: BaseType::Integer.to_string(),
        }),
    }
}

/// Lit un texte ; Null → chaîne vide (comportement des colonnes libres Mondo).
pub fn text_or_empty(table: &Table, row: usize, column: &str) -> String {
    table.get(row, column).to_cell()
}

/// Lit un texte optionnel ; Null → None.
pub fn optional_text(table: &Table, row: usize, column: &str) -> Option<String> {
    match table.get(row, column) {
        Value::Null => None,
        other => Some(other.to_cell()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{concept_relationship_schema, nodes_schema};

    #[test]
    fn test_validate_table_ok() {
        let table = Table::from_text(
            "concept_relationship",
            &["concept_id_1", "concept_id_2", "relationship_id", "valid_end_date"],
            &[vec!["100", "200", "Maps to", "20991231"]],
        );
        assert!(validate_table(&table, &concept_relationship_schema()).is_ok());
    }

    #[test]
    fn test_validate_table_reports_all_missing_columns() {
        let table = Table::from_text("nodes", &["id", "category", "name"], &[]);
        match validate_table(&table, &nodes_schema()) {
            Err(CrosswalkError::MissingColumns { table, columns }) => {
                assert_eq!(table, "nodes");
                assert_eq!(columns, vec!["description", "same_as", "subsets"]);
            }
            other => panic!("attendu MissingColumns, obtenu {:?}", other),
        }
    }

    #[test]
    fn test_required_integer() {
        let table = Table::from_text(
            "concept",
            &["concept_id"],
            &[vec!["100"], vec!["abc"], vec![""]],
        );
        assert_eq!(required_integer(&table, 0, "concept_id").unwrap(), 100);
        assert!(matches!(
            required_integer(&table, 1, "concept_id"),
            Err(CrosswalkError::InvalidValue { row: 1, .. })
        ));
        assert!(required_integer(&table, 2, "concept_id").is_err());
    }

    #[test]
    fn test_text_helpers() {
        let table = Table::from_text("nodes", &["name", "same_as"], &[vec!["flu", ""]]);
        assert_eq!(text_or_empty(&table, 0, "same_as"), "");
        assert_eq!(optional_text(&table, 0, "same_as"), None);
        assert_eq!(optional_text(&table, 0, "name"), Some("flu".into()));
    }
}
