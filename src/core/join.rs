// =============================================================================
// JOIN — Jointures d'égalité en mémoire
// =============================================================================
//
// Le ConceptMapper et l'OutputAssembler sont des enchaînements de jointures
// relationnelles sur des tables entières :
//
//   inner_join : SELECT ... FROM L JOIN R ON key(L) = key(R)
//   left_join  : SELECT ... FROM L LEFT JOIN R ON key(L) = key(R)
//
// ALGORITHME (hash join) :
//   1. Indexer R : clé → positions des lignes, dans l'ordre de R
//   2. Parcourir L dans l'ordre ; pour chaque ligne, émettre une paire par
//      ligne de R de même clé
//
// L'ordre de sortie est donc (ordre de L, puis ordre de R) : déterministe.
//
// Les clés peuvent emprunter les lignes (ex: (&str, &str)) : les fonctions
// de clé reçoivent des références de même durée de vie que les tables.
//
// PERTE DE DONNÉES : une jointure interne écarte SILENCIEUSEMENT les lignes
// sans correspondance. Ce n'est pas une erreur, mais chaque jointure rend un
// JoinStats (lignes entrantes / sortantes / écartées) pour que la perte soit
// mesurable et testée.
//
// =============================================================================

use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Comptabilité d'une jointure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinStats {
    /// Nom de l'étape (pour les logs et le rapport)
    pub stage: String,
    pub left_rows: usize,
    pub right_rows: usize,
    pub output_rows: usize,
    /// Lignes de gauche sans correspondance (écartées par une jointure interne)
    pub unmatched_left: usize,
    /// Lignes de droite jamais appariées
    pub unmatched_right: usize,
}

impl JoinStats {
    /// Lignes de gauche perdues par l'étape
    pub fn dropped(&self) -> usize {
        self.unmatched_left
    }
}

impl std::fmt::Display for JoinStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} : {} × {} → {} lignes ({} écartées à gauche, {} inutilisées à droite)",
            self.stage, self.left_rows, self.right_rows, self.output_rows,
            self.unmatched_left, self.unmatched_right
        )
    }
}

/// Index clé → positions dans `rows`, dans l'ordre des lignes.
fn index_by<'r, R, K, F>(rows: &'r [R], key: F) -> HashMap<K, Vec<usize>>
where
    K: Eq + Hash,
    F: Fn(&'r R) -> K,
{
    let mut index: HashMap<K, Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        index.entry(key(row)).or_default().push(i);
    }
    index
}

/// Jointure interne d'égalité.
pub fn inner_join<'l, 'r, L, R, K, FL, FR>(
    stage: &str,
    left: &'l [L],
    right: &'r [R],
    left_key: FL,
    right_key: FR,
) -> (Vec<(&'l L, &'r R)>, JoinStats)
where
    K: Eq + Hash,
    FL: Fn(&'l L) -> K,
    FR: Fn(&'r R) -> K,
{
    let index = index_by(right, right_key);
    let mut used_right = vec![false; right.len()];
    let mut output = Vec::new();
    let mut unmatched_left = 0usize;

    for l in left {
        match index.get(&left_key(l)) {
            Some(positions) => {
                for &i in positions {
                    used_right[i] = true;
                    output.push((l, &right[i]));
                }
            }
            None => unmatched_left += 1,
        }
    }

    let stats = JoinStats {
        stage: stage.to_string(),
        left_rows: left.len(),
        right_rows: right.len(),
        output_rows: output.len(),
        unmatched_left,
        unmatched_right: used_right.iter().filter(|&&u| !u).count(),
    };
    debug!(%stats, "jointure interne");
    (output, stats)
}

/// Jointure externe gauche : toute ligne de gauche produit au moins une ligne.
pub fn left_join<'l, 'r, L, R, K, FL, FR>(
    stage: &str,
    left: &'l [L],
    right: &'r [R],
    left_key: FL,
    right_key: FR,
) -> (Vec<(&'l L, Option<&'r R>)>, JoinStats)
where
    K: Eq + Hash,
    FL: Fn(&'l L) -> K,
    FR: Fn(&'r R) -> K,
{
    let index = index_by(right, right_key);
    let mut used_right = vec![false; right.len()];
    let mut output = Vec::new();
    let mut unmatched_left = 0usize;

    for l in left {
        match index.get(&left_key(l)) {
            Some(positions) => {
                for &i in positions {
                    used_right[i] = true;
                    output.push((l, Some(&right[i])));
                }
            }
            None => {
                unmatched_left += 1;
                output.push((l, None));
            }
        }
    }

    let stats = JoinStats {
        stage: stage.to_string(),
        left_rows: left.len(),
        right_rows: right.len(),
        output_rows: output.len(),
        unmatched_left,
        unmatched_right: used_right.iter().filter(|&&u| !u).count(),
    };
    debug!(%stats, "jointure gauche");
    (output, stats)
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_join_drops_unmatched() {
        let left = vec![(1, "a"), (2, "b"), (3, "c")];
        let right = vec![(1, "x"), (3, "y"), (4, "z")];
        let (rows, stats) = inner_join("t", &left, &right, |l| l.0, |r| r.0);

        let pairs: Vec<(&str, &str)> = rows.iter().map(|(l, r)| (l.1, r.1)).collect();
        assert_eq!(pairs, vec![("a", "x"), ("c", "y")]);
        assert_eq!(stats.left_rows, 3);
        assert_eq!(stats.output_rows, 2);
        assert_eq!(stats.dropped(), 1);
        assert_eq!(stats.unmatched_right, 1);
    }

    #[test]
    fn test_inner_join_fans_out_in_right_order() {
        let left = vec![(1, "a")];
        let right = vec![(1, "x"), (2, "skip"), (1, "y")];
        let (rows, stats) = inner_join("t", &left, &right, |l| l.0, |r| r.0);
        let pairs: Vec<&str> = rows.iter().map(|(_, r)| r.1).collect();
        assert_eq!(pairs, vec!["x", "y"]);
        assert_eq!(stats.output_rows, 2);
        assert_eq!(stats.dropped(), 0);
    }

    #[test]
    fn test_inner_join_composite_key() {
        let left = vec![("12345", "SNOMED"), ("12345", "MeSH")];
        let right = vec![("12345", "SNOMED", 100)];
        let (rows, _) = inner_join("t", &left, &right, |l| (l.0, l.1), |r| (r.0, r.1));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1 .2, 100);
    }

    #[test]
    fn test_left_join_keeps_every_left_row() {
        let left = vec![(1, "a"), (2, "b")];
        let right = vec![(1, "x")];
        let (rows, stats) = left_join("t", &left, &right, |l| l.0, |r| r.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.map(|r| r.1), Some("x"));
        assert!(rows[1].1.is_none());
        assert_eq!(stats.unmatched_left, 1);
        assert_eq!(stats.output_rows, 2);
    }

    #[test]
    fn test_join_empty_sides() {
        let left: Vec<(i32, &str)> = vec![];
        let right = vec![(1, "x")];
        let (rows, stats) = inner_join("t", &left, &right, |l| l.0, |r| r.0);
        assert!(rows.is_empty());
        assert_eq!(stats.unmatched_right, 1);
    }
}
