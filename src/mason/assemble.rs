//! Mason's gain formula assembly.
//!
//! ```text
//! T = (Σ Pk·Δk) / Δ
//! Δ  = 1 - (Σ L) + (Σ LiLj) - (Σ LiLjLk) + ...
//! ```
//!
//! Each sum is rendered as a parenthesized, `+`-joined list and empty sums are
//! left out. `Δk` uses only the loops that share no node with path `k`.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::loops::MergedLoop;
use super::nontouching::{find_non_touching, NonTouchingSet};
use super::paths::ForwardPath;
use super::CombinationOrder;
use crate::gain;

/// System determinant and one cofactor per forward path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Determinants {
    /// Δ
    pub system: String,
    /// Δ1, Δ2, ... in forward path order
    pub paths: Vec<String>,
}

impl Determinants {
    /// `("Δ", ..), ("Δ1", ..), ...`
    pub fn labeled(&self) -> Vec<(String, &str)> {
        std::iter::once(("Δ".to_string(), self.system.as_str()))
            .chain(
                self.paths
                    .iter()
                    .enumerate()
                    .map(|(i, d)| (format!("Δ{}", i + 1), d.as_str())),
            )
            .collect()
    }
}

impl Serialize for Determinants {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labeled = self.labeled();
        let mut map = serializer.serialize_map(Some(labeled.len()))?;
        for (label, value) in &labeled {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Build a determinant from individual loop gains and non-touching groups.
///
/// Groups of odd size are subtracted and groups of even size added, matching
/// the alternating signs of Mason's formula.
pub fn determinant(loops: &[&MergedLoop], groups: &[NonTouchingSet]) -> String {
    let mut delta = gain::UNITY.to_string();

    if !loops.is_empty() {
        let sum = loops
            .iter()
            .map(|l| l.gain.to_string())
            .collect::<Vec<_>>()
            .join("+");
        delta = gain::add(&delta, &format!("-({})", sum));
    }

    let mut by_order: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for group in groups {
        by_order
            .entry(group.order())
            .or_default()
            .push(group.gain.to_string());
    }
    for (order, terms) in by_order {
        let sign = if order % 2 == 0 { "" } else { "-" };
        delta = gain::add(&delta, &format!("{}({})", sign, terms.join("+")));
    }

    gain::simplify(&delta)
}

/// Cofactor of a forward path: the determinant over loops it does not touch.
pub fn path_cofactor(path: &ForwardPath, loops: &[MergedLoop], order: CombinationOrder) -> String {
    let untouched: Vec<MergedLoop> = loops
        .iter()
        .filter(|l| !path.touches(&l.node_set()))
        .cloned()
        .collect();

    if untouched.is_empty() {
        return gain::UNITY.to_string();
    }

    let groups = find_non_touching(&untouched, order);
    let refs: Vec<&MergedLoop> = untouched.iter().collect();
    determinant(&refs, &groups)
}

/// Render `T = (numerator) / (Δ)`.
///
/// The numerator is the `+`-joined list of `Pk*Δk`; with no forward paths it
/// is `0`.
pub fn transfer_function(paths: &[ForwardPath], deltas: &Determinants) -> String {
    let terms: Vec<String> = paths
        .iter()
        .zip(&deltas.paths)
        .map(|(p, dk)| gain::multiply(&p.gain.to_string(), dk))
        .collect();

    let numerator = if terms.is_empty() {
        gain::ZERO.to_string()
    } else {
        gain::simplify(&terms.join("+"))
    };

    format!("T = ({}) / ({})", numerator, deltas.system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gain::Gain;
    use crate::graph::NodeId;

    fn lp(gain: &str, path: &[u64]) -> MergedLoop {
        let nodes: Vec<NodeId> = path.iter().copied().map(NodeId).collect();
        MergedLoop {
            nodes: nodes.clone(),
            gain: Gain::parse(gain),
            all_paths: vec![nodes],
            normalized_gain: gain.to_string(),
            signature: String::new(),
        }
    }

    fn fp(gain: &str, path: &[u64]) -> ForwardPath {
        ForwardPath {
            nodes: path.iter().copied().map(NodeId).collect(),
            gain: Gain::parse(gain),
        }
    }

    #[test]
    fn test_determinant_without_loops_is_one() {
        assert_eq!(determinant(&[], &[]), "1");
    }

    #[test]
    fn test_determinant_with_pair() {
        let loops = vec![lp("l1", &[1, 2, 1]), lp("l2", &[3, 4, 3])];
        let groups = find_non_touching(&loops, CombinationOrder::Pairs);
        let refs: Vec<&MergedLoop> = loops.iter().collect();
        assert_eq!(determinant(&refs, &groups), "1-(l1+l2)+(l1*l2)");
    }

    #[test]
    fn test_determinant_with_triple() {
        let loops = vec![
            lp("a", &[1, 2, 1]),
            lp("b", &[3, 4, 3]),
            lp("c", &[5, 6, 5]),
        ];
        let refs: Vec<&MergedLoop> = loops.iter().collect();

        let pairs = find_non_touching(&loops, CombinationOrder::Pairs);
        assert_eq!(
            determinant(&refs, &pairs),
            "1-(a+b+c)+(a*b+a*c+b*c)"
        );

        let all = find_non_touching(&loops, CombinationOrder::All);
        assert_eq!(
            determinant(&refs, &all),
            "1-(a+b+c)+(a*b+a*c+b*c)-(a*b*c)"
        );
    }

    #[test]
    fn test_path_cofactor_uses_untouched_loops() {
        let loops = vec![lp("l1", &[2, 3, 2]), lp("l2", &[5, 6, 5])];
        let path = fp("g1*g2", &[1, 2, 3, 4]);
        assert_eq!(
            path_cofactor(&path, &loops, CombinationOrder::Pairs),
            "1-(l2)"
        );

        let touching_all = fp("g", &[1, 2, 5]);
        assert_eq!(
            path_cofactor(&touching_all, &loops, CombinationOrder::Pairs),
            "1"
        );
    }

    #[test]
    fn test_transfer_function_rendering() {
        let paths = vec![fp("g1*g2", &[1, 2, 3])];
        let deltas = Determinants {
            system: "1-(g2*h1)".to_string(),
            paths: vec!["1".to_string()],
        };
        assert_eq!(
            transfer_function(&paths, &deltas),
            "T = (g1*g2) / (1-(g2*h1))"
        );

        let none = Determinants {
            system: "1".to_string(),
            paths: vec![],
        };
        assert_eq!(transfer_function(&[], &none), "T = (0) / (1)");
    }

    #[test]
    fn test_determinants_serialize_as_ordered_map() {
        let deltas = Determinants {
            system: "1-(l)".to_string(),
            paths: vec!["1".to_string(), "1-(l)".to_string()],
        };
        let json = serde_json::to_string(&deltas).unwrap();
        assert_eq!(json, r#"{"Δ":"1-(l)","Δ1":"1","Δ2":"1-(l)"}"#);
    }
}
