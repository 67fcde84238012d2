// =============================================================================
// TABLE — Une table en mémoire à colonnes nommées
// =============================================================================
//
// C'est la forme commune de TOUTES les données qui traversent la frontière
// du cœur : les quatre tables d'entrée (arêtes, nœuds, CONCEPT,
// CONCEPT_RELATIONSHIP) et la table de sortie (le crosswalk).
//
//   Table edges = {
//     columns: [subject, object, predicate, ...]
//     rows:
//       [0] "MONDO:0000002", "MONDO:0700096", "biolink:subclass_of"
//       [1] ...
//   }
//
// Une table est un artefact en lecture seule : chaque étape du pipeline
// produit une NOUVELLE table (ou de nouveaux enregistrements typés) à partir
// de ses entrées, aucune n'est modifiée en place.
//
// =============================================================================

use std::collections::HashMap;
use super::schema::TableSchema;
use super::typeside::Value;

static NULL: Value = Value::Null;

/// Une table : des colonnes nommées et des lignes de Value.
///
/// Toutes les lignes ont exactement `columns.len()` cellules :
/// `push_row` complète avec Null ou tronque.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Nom de la table (pour les messages d'erreur et les logs)
    pub name: String,
    /// Noms des colonnes, dans l'ordre du fichier
    pub columns: Vec<String>,
    /// Les lignes
    pub rows: Vec<Vec<Value>>,
    /// Index nom de colonne → position
    index: HashMap<String, usize>,
}

impl Table {
    /// Crée une table vide avec les colonnes données.
    ///
    /// Si un nom de colonne est répété, la première occurrence gagne.
    pub fn new(name: &str, columns: Vec<String>) -> Self {
        let mut index = HashMap::new();
        for (i, column) in columns.iter().enumerate() {
            index.entry(column.clone()).or_insert(i);
        }
        Table {
            name: name.to_string(),
            columns,
            rows: Vec::new(),
            index,
        }
    }

    /// Crée une table vide dont les colonnes sont celles d'un schéma.
    pub fn with_schema(schema: &TableSchema) -> Self {
        Table::new(&schema.name, schema.column_names())
    }

    /// Crée une table de texte à partir de lignes brutes (utile pour les tests
    /// et les lecteurs). Les cellules vides deviennent Null.
    pub fn from_text(name: &str, columns: &[&str], rows: &[Vec<&str>]) -> Self {
        let mut table = Table::new(name, columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|cell| Value::from_cell(cell)).collect());
        }
        table
    }

    /// Ajoute une ligne, complétée avec Null ou tronquée à la largeur de la table.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Position d'une colonne
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Lit une cellule. Une colonne inconnue se lit comme Null.
    pub fn get(&self, row: usize, column: &str) -> &Value {
        match (self.rows.get(row), self.column_index(column)) {
            (Some(cells), Some(i)) => &cells[i],
            _ => &NULL,
        }
    }

    /// Lit une cellule sous forme de texte ; Null et colonne inconnue → None.
    pub fn get_str(&self, row: usize, column: &str) -> Option<&str> {
        self.get(row, column).as_str()
    }

    /// Nombre de lignes
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// La table est-elle vide ?
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Affiche la table de manière lisible (pour le debug)
    pub fn display(&self, max_rows: usize) -> String {
        let mut out = format!("table {} ({} lignes) = {{\n", self.name, self.len());
        out.push_str(&format!("  [{}]\n", self.columns.join(", ")));
        for (i, row) in self.rows.iter().take(max_rows).enumerate() {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            out.push_str(&format!("  [{}] {}\n", i, cells.join(", ")));
        }
        if self.len() > max_rows {
            out.push_str(&format!("  ... {} lignes de plus\n", self.len() - max_rows));
        }
        out.push_str("}\n");
        out
    }
}
