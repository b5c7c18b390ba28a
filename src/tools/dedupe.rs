//! tools::dedupe
//!
//! Find and remove items that are probably the same thing under slightly
//! different names.
//!
//! # Matching
//!
//! Two items match when one's name, lowercased and trimmed, contains the
//! other's. Items with blank names never match anything.
//!
//! # Survivor
//!
//! Groups form around survivors. Names are visited shortest first (by
//! characters; ties in document order, rows top to bottom, then untiered).
//! Each name not yet claimed becomes a survivor and claims every unclaimed
//! item that matches *it*. Matching is not chained: with `"Burger King
//! Fries"`, `"Burger"` and `"Fries"`, only `"Burger King Fries"` goes;
//! `"Burger"` and `"Fries"` do not match each other and both stay.
//!
//! # Example
//!
//! ```
//! use tierlist::core::model::{Document, Item};
//! use tierlist::core::types::ImageSource;
//! use tierlist::tools::dedupe::DedupePlan;
//!
//! let mut doc = Document::new("food");
//! for name in ["Pizza Hut", "Pizza Hut Branch 2", "KFC"] {
//!     doc.push_untiered(Item::new(ImageSource::new("data:image/png;base64,AA"), name));
//! }
//!
//! let plan = DedupePlan::build(&doc);
//! assert_eq!(plan.groups.len(), 1);
//! assert_eq!(plan.groups[0].keep.name, "Pizza Hut");
//!
//! assert_eq!(plan.apply(&mut doc), 1);
//! let names: Vec<_> = doc.untiered.items.iter().map(|i| i.name.as_str()).collect();
//! assert_eq!(names, ["Pizza Hut", "KFC"]);
//! ```

use std::fmt;

use log::debug;

use crate::core::model::Document;
use crate::core::types::ItemId;
use crate::engine::placement::ItemSlot;

/// One item as seen by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: ItemId,
    pub slot: ItemSlot,
    pub name: String,
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.name, self.slot)
    }
}

/// A set of matching items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub keep: ItemRef,
    /// In document order.
    pub remove: Vec<ItemRef>,
}

/// Everything a dedupe run would remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupePlan {
    /// Ordered by the first member's document position.
    pub groups: Vec<DuplicateGroup>,
}

impl DedupePlan {
    /// Plan against the current document; nothing is changed.
    pub fn build(doc: &Document) -> Self {
        Self {
            groups: find_duplicate_groups(doc),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of items that [`apply`](Self::apply) would remove.
    pub fn removal_count(&self) -> usize {
        self.groups.iter().map(|g| g.remove.len()).sum()
    }

    /// Remove the planned items; returns how many were removed.
    ///
    /// Items are found by id, so a plan built on this document stays valid
    /// even if removals shift positions. Items that have vanished since
    /// planning are skipped.
    pub fn apply(&self, doc: &mut Document) -> usize {
        let mut removed = 0;
        for item in self.groups.iter().flat_map(|g| &g.remove) {
            let Some((container, index)) = doc.locate(item.id) else {
                debug!("dedupe: {} already gone", item.id);
                continue;
            };
            if doc.remove_item(container, index).is_ok() {
                removed += 1;
            }
        }
        removed
    }
}

/// Group items whose names contain one another.
pub fn find_duplicate_groups(doc: &Document) -> Vec<DuplicateGroup> {
    let candidates: Vec<(ItemRef, String)> = doc
        .containers()
        .flat_map(|(container, items)| {
            items.iter().enumerate().map(move |(index, item)| {
                (
                    ItemRef {
                        id: item.id,
                        slot: ItemSlot::new(container, index),
                        name: item.name.clone(),
                    },
                    item.name.trim().to_lowercase(),
                )
            })
        })
        .filter(|(_, key)| !key.is_empty())
        .collect();

    // Stable sort: equal lengths stay in document order.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| candidates[i].0.name.trim().chars().count());

    let mut claimed = vec![false; candidates.len()];
    let mut groups: Vec<(usize, DuplicateGroup)> = Vec::new();
    for &keep in &order {
        if claimed[keep] {
            continue;
        }
        claimed[keep] = true;
        let key = candidates[keep].1.as_str();

        let mut members = Vec::new();
        for (i, (_, other)) in candidates.iter().enumerate() {
            if !claimed[i] && (other.contains(key) || key.contains(other.as_str())) {
                claimed[i] = true;
                members.push(i);
            }
        }
        if members.is_empty() {
            continue;
        }

        let first = members.iter().copied().fold(keep, usize::min);
        debug!(
            "dedupe: {:?} absorbs {} items",
            candidates[keep].0.name,
            members.len()
        );
        groups.push((
            first,
            DuplicateGroup {
                keep: candidates[keep].0.clone(),
                remove: members.iter().map(|&i| candidates[i].0.clone()).collect(),
            },
        ));
    }

    groups.sort_by_key(|(first, _)| *first);
    groups.into_iter().map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ContainerId, Item, Palette};
    use crate::core::types::ImageSource;

    fn item(name: &str) -> Item {
        Item::new(ImageSource::new("data:image/png;base64,AA"), name)
    }

    fn untiered(names: &[&str]) -> Document {
        let mut doc = Document::new("t");
        for name in names {
            doc.push_untiered(item(name));
        }
        doc
    }

    fn group_names(plan: &DedupePlan) -> Vec<(String, Vec<String>)> {
        plan.groups
            .iter()
            .map(|g| {
                (
                    g.keep.name.clone(),
                    g.remove.iter().map(|r| r.name.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn case_insensitive_containment() {
        let plan = DedupePlan::build(&untiered(&["kfc", "KFC Express", "Subway"]));
        assert_eq!(
            group_names(&plan),
            [("kfc".to_string(), vec!["KFC Express".to_string()])]
        );
    }

    #[test]
    fn matches_are_not_chained() {
        // "Burger" and "Fries" both match "Burger King Fries" but not each other.
        let mut doc = untiered(&["Burger King Fries", "Burger", "Fries", "King Fries"]);
        let plan = DedupePlan::build(&doc);

        assert_eq!(
            group_names(&plan),
            [(
                "Fries".to_string(),
                vec!["Burger King Fries".to_string(), "King Fries".to_string()]
            )]
        );

        plan.apply(&mut doc);
        let survivors: Vec<_> = doc.untiered.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(survivors, ["Burger", "Fries"]);
    }

    #[test]
    fn removed_items_always_match_their_survivor() {
        let plan = DedupePlan::build(&untiered(&["Tea", "Green Tea", "Green", "Greenery"]));
        for group in &plan.groups {
            let keep = group.keep.name.to_lowercase();
            for item in &group.remove {
                let name = item.name.to_lowercase();
                assert!(name.contains(&keep) || keep.contains(&name), "{name} vs {keep}");
            }
        }
    }

    #[test]
    fn tie_keeps_first_in_document_order() {
        let mut doc = Document::with_rows("t", &["S"], &Palette::default());
        doc.push_untiered(item("abc"));
        doc.rows[0].items.push(item("ABC"));

        let plan = DedupePlan::build(&doc);

        assert_eq!(plan.groups[0].keep.slot, ItemSlot::new(ContainerId::Row(0), 0));
        assert_eq!(plan.groups[0].remove[0].slot.container, ContainerId::Untiered);
    }

    #[test]
    fn blank_names_never_match() {
        let plan = DedupePlan::build(&untiered(&["", "  ", "Taco"]));
        assert!(plan.is_empty());
    }

    #[test]
    fn separate_groups_in_order() {
        let plan = DedupePlan::build(&untiered(&["Tea", "Coffee", "Iced Tea", "coffee beans"]));
        let keeps: Vec<_> = plan.groups.iter().map(|g| g.keep.name.as_str()).collect();
        assert_eq!(keeps, ["Tea", "Coffee"]);
    }

    #[test]
    fn apply_removes_across_containers() {
        let mut doc = Document::with_rows("t", &["S", "A"], &Palette::default());
        doc.rows[0].items.push(item("Pho"));
        doc.rows[1].items.push(item("Pho 24"));
        doc.push_untiered(item("pho express"));
        doc.push_untiered(item("Ramen"));

        let plan = DedupePlan::build(&doc);
        assert_eq!(plan.apply(&mut doc), 2);

        assert_eq!(doc.item_count(), 2);
        assert_eq!(doc.rows[0].items[0].name, "Pho");
        assert!(doc.rows[1].items.is_empty());
        assert_eq!(doc.untiered.items[0].name, "Ramen");
    }

    #[test]
    fn apply_twice_is_harmless() {
        let mut doc = untiered(&["Pizza Hut", "Pizza Hut Branch 2"]);
        let plan = DedupePlan::build(&doc);
        assert_eq!(plan.apply(&mut doc), 1);
        assert_eq!(plan.apply(&mut doc), 0);
    }
}
