// =============================================================================
// TYPESIDE — Les types primitifs des cellules de table
// =============================================================================
//
// Toutes les tables du pipeline (Mondo KGX, OMOP CONCEPT, OMOP
// CONCEPT_RELATIONSHIP, crosswalk final) sont des grilles de cellules.
// Chaque cellule contient une Value, et chaque colonne déclare un BaseType.
//
// ANALOGIE : c'est l'équivalent des types SQL (VARCHAR, INTEGER)
// réduit au strict nécessaire pour le crosswalk. Les drapeaux "rare" de la
// sortie sont des Integer 0/1.
//
// Les fichiers délimités ne connaissent que du texte : le lecteur produit
// des Value::String (ou Value::Null pour une cellule vide), et c'est le
// décodage typé (module model) qui convertit vers Integer quand le schéma
// le demande.
//
// =============================================================================

use std::fmt;

/// Type déclaré d'une colonne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// Texte libre (→ VARCHAR)
    String,
    /// Entier (→ INTEGER), ex: concept_id, drapeaux 0/1
    Integer,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::String => write!(f, "String"),
            BaseType::Integer => write!(f, "Int"),
        }
    }
}

/// Une valeur concrète dans une cellule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    String(std::string::String),
    Integer(i64),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl Value {
    /// Construit une Value à partir d'une cellule brute : vide → Null.
    pub fn from_cell(raw: &str) -> Self {
        if raw.is_empty() {
            Value::Null
        } else {
            Value::String(raw.to_string())
        }
    }

    /// Texte écrit dans un fichier délimité (Null → cellule vide).
    pub fn to_cell(&self) -> std::string::String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Null => std::string::String::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Vue texte de la valeur, si c'en est une.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convertit la valeur vers le type demandé.
    ///
    /// Null reste Null. Un texte numérique devient Integer ; pandas écrit
    /// parfois les entiers sous forme "123.0", on l'accepte aussi.
    /// Retourne None si la conversion est impossible.
    pub fn coerce(&self, ty: BaseType) -> Option<Value> {
        match (self, ty) {
            (Value::Null, _) => Some(Value::Null),
            (Value::String(_), BaseType::String)
            | (Value::Integer(_), BaseType::Integer) => Some(self.clone()),
            (Value::Integer(i), BaseType::String) => Some(Value::String(i.to_string())),
            (Value::String(s), BaseType::Integer) => parse_integer(s).map(Value::Integer),
        }
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i);
    }
    // "123.0" → 123, mais "123.5" est refusé
    trimmed
        .strip_suffix(".0")
        .and_then(|int_part| int_part.parse::<i64>().ok())
}
