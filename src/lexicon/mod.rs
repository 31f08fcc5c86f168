//! Synonym, style, color, and room dictionaries.
//!
//! The lexicon maps any member of a synonym group to the group's
//! canonical key in O(1), and expands a canonical key back to all of its
//! members. One token may belong to several axes (e.g. a color word that
//! is also a wood species), and lookup returns every match. The tables are
//! static Hungarian furniture vocabulary loaded once; nothing mutates at
//! runtime.

mod data;

use ahash::AHashMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::analysis::fold_diacritics;

/// One structured dimension of parsed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetAxis {
    FurnitureType,
    Style,
    Color,
    Room,
}

/// One synonym group: a canonical key and its member terms.
#[derive(Debug, Clone)]
struct Group {
    axis: FacetAxis,
    /// Folded canonical key, e.g. `kanape`.
    canonical: String,
    /// Display form of the canonical key, accents preserved.
    display: &'static str,
    /// Folded members, canonical included.
    members: Vec<String>,
}

/// A lookup result: the axis and canonical key a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetMatch<'a> {
    pub axis: FacetAxis,
    /// Folded canonical group key.
    pub canonical: &'a str,
    /// Accented display form of the canonical key.
    pub display: &'a str,
}

/// Static synonym/style/color/room dictionaries with reverse lookup.
#[derive(Debug)]
pub struct Lexicon {
    groups: Vec<Group>,
    /// Folded member term → indices of every group containing it.
    reverse: AHashMap<String, Vec<usize>>,
}

impl Lexicon {
    /// Build the Hungarian furniture lexicon from the static tables.
    pub fn hungarian() -> Self {
        let mut groups = Vec::new();

        let axes: [(FacetAxis, &[(&str, &[&str])]); 4] = [
            (FacetAxis::FurnitureType, data::FURNITURE_TYPES),
            (FacetAxis::Style, data::STYLES),
            (FacetAxis::Color, data::COLORS),
            (FacetAxis::Room, data::ROOMS),
        ];

        for (axis, table) in axes {
            for &(display, members) in table {
                let canonical = fold_diacritics(display);
                let mut folded: Vec<String> = Vec::with_capacity(members.len() + 1);
                folded.push(canonical.clone());
                folded.extend(members.iter().map(|m| fold_diacritics(m)));

                groups.push(Group {
                    axis,
                    canonical,
                    display,
                    members: folded,
                });
            }
        }

        let mut reverse: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for member in &group.members {
                let entries = reverse.entry(member.clone()).or_default();
                if !entries.contains(&idx) {
                    entries.push(idx);
                }
            }
        }

        Lexicon { groups, reverse }
    }

    /// A process-wide shared instance of the Hungarian lexicon.
    pub fn shared() -> &'static Lexicon {
        lazy_static! {
            static ref HUNGARIAN: Lexicon = Lexicon::hungarian();
        }
        &HUNGARIAN
    }

    /// Look up every group a folded token belongs to.
    pub fn matches(&self, token: &str) -> Vec<FacetMatch<'_>> {
        match self.reverse.get(token) {
            Some(indices) => indices
                .iter()
                .map(|&idx| {
                    let group = &self.groups[idx];
                    FacetMatch {
                        axis: group.axis,
                        canonical: &group.canonical,
                        display: group.display,
                    }
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// All folded members of a canonical group on the given axis,
    /// canonical key included.
    pub fn expansions(&self, axis: FacetAxis, canonical: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.axis == axis && g.canonical == canonical)
            .map(|g| g.members.as_slice())
    }

    /// Accented display form of a folded term, when the term is the
    /// canonical key or a member of any group. Groups are searched in
    /// table order; the canonical display of the first containing group
    /// wins.
    pub fn display_for(&self, term: &str) -> Option<&'static str> {
        let indices = self.reverse.get(term)?;
        let group = &self.groups[*indices.first()?];
        if group.canonical == term {
            return Some(group.display);
        }
        // A non-canonical member: its own display form is recoverable
        // from the static tables by position.
        let pos = group.members.iter().position(|m| m == term)?;
        if pos == 0 {
            Some(group.display)
        } else {
            group.display_member(pos - 1)
        }
    }

    /// Iterate every distinct folded term known to the lexicon.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.reverse.keys().map(String::as_str)
    }

    /// Number of synonym groups across all axes.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Group {
    /// Display form of the `idx`-th non-canonical member.
    fn display_member(&self, idx: usize) -> Option<&'static str> {
        let table: &[(&str, &[&str])] = match self.axis {
            FacetAxis::FurnitureType => data::FURNITURE_TYPES,
            FacetAxis::Style => data::STYLES,
            FacetAxis::Color => data::COLORS,
            FacetAxis::Room => data::ROOMS,
        };
        table
            .iter()
            .find(|(display, _)| *display == self.display)
            .and_then(|(_, members)| members.get(idx).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_lookup() {
        let lexicon = Lexicon::hungarian();
        let matches = lexicon.matches("kanape");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].axis, FacetAxis::FurnitureType);
        assert_eq!(matches[0].canonical, "kanape");
        assert_eq!(matches[0].display, "kanapé");
    }

    #[test]
    fn test_synonym_maps_to_canonical() {
        let lexicon = Lexicon::hungarian();
        let matches = lexicon.matches("ulogarnitura");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].canonical, "kanape");
    }

    #[test]
    fn test_token_may_match_multiple_groups() {
        let lexicon = Lexicon::hungarian();
        // "heverő" is listed under both kanapé and ágy.
        let matches = lexicon.matches("hevero");
        let canonicals: Vec<&str> = matches.iter().map(|m| m.canonical).collect();
        assert!(canonicals.contains(&"kanape"));
        assert!(canonicals.contains(&"agy"));
    }

    #[test]
    fn test_expansions_include_canonical() {
        let lexicon = Lexicon::hungarian();
        let members = lexicon
            .expansions(FacetAxis::FurnitureType, "kanape")
            .unwrap();
        assert!(members.contains(&"kanape".to_string()));
        assert!(members.contains(&"szofa".to_string()));
        assert!(members.contains(&"hevero".to_string()));
    }

    #[test]
    fn test_unknown_token_matches_nothing() {
        let lexicon = Lexicon::hungarian();
        assert!(lexicon.matches("zsiraf").is_empty());
        assert!(lexicon.expansions(FacetAxis::Style, "zsiraf").is_none());
    }

    #[test]
    fn test_display_for_recovers_accents() {
        let lexicon = Lexicon::hungarian();
        assert_eq!(lexicon.display_for("kanape"), Some("kanapé"));
        assert_eq!(lexicon.display_for("szofa"), Some("szófa"));
        assert_eq!(lexicon.display_for("skandinav"), Some("skandináv"));
        assert_eq!(lexicon.display_for("nincsilyen"), None);
    }

    #[test]
    fn test_shared_instance_is_stable() {
        let a = Lexicon::shared();
        let b = Lexicon::shared();
        assert_eq!(a.group_count(), b.group_count());
        assert!(a.group_count() > 20);
    }

    #[test]
    fn test_style_and_color_axes() {
        let lexicon = Lexicon::hungarian();
        assert_eq!(lexicon.matches("ipari")[0].canonical, "indusztrialis");
        assert_eq!(lexicon.matches("krem")[0].canonical, "bezs");
        assert_eq!(lexicon.matches("konyha")[0].canonical, "etkezo");
    }
}
