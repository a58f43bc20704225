//! The player's collected supplies and medications.

use ersim_logic::catalog::Item;
use serde::{Deserialize, Serialize};

/// Ordered by collection time; duplicates allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn contains(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    /// Remove the oldest copy of `item`. Returns false if none was held.
    pub fn remove_one(&mut self, item: Item) -> bool {
        match self.items.iter().position(|i| *i == item) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, item: Item) -> usize {
        self.items.iter().filter(|i| **i == item).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// (item, count) pairs in order of first collection.
    pub fn grouped(&self) -> Vec<(Item, usize)> {
        let mut out: Vec<(Item, usize)> = Vec::new();
        for item in &self.items {
            match out.iter_mut().find(|(i, _)| i == item) {
                Some((_, n)) => *n += 1,
                None => out.push((*item, 1)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ersim_logic::catalog::{Medication, Supply};

    const MASK: Item = Item::Supply(Supply::OxygenMask);
    const ASPIRIN: Item = Item::Medication(Medication::Aspirin);

    #[test]
    fn test_add_and_remove() {
        let mut inv = Inventory::new();
        assert!(inv.is_empty());
        inv.add(MASK);
        inv.add(ASPIRIN);
        inv.add(ASPIRIN);
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.count(ASPIRIN), 2);
        assert!(inv.remove_one(ASPIRIN));
        assert_eq!(inv.count(ASPIRIN), 1);
        assert!(inv.remove_one(ASPIRIN));
        assert!(!inv.remove_one(ASPIRIN));
        assert!(!inv.contains(ASPIRIN));
        assert!(inv.contains(MASK));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut inv = Inventory::new();
        inv.add(ASPIRIN);
        inv.add(MASK);
        inv.add(ASPIRIN);
        inv.remove_one(ASPIRIN);
        assert_eq!(inv.items(), &[MASK, ASPIRIN]);
    }

    #[test]
    fn test_grouped() {
        let mut inv = Inventory::new();
        inv.add(MASK);
        inv.add(ASPIRIN);
        inv.add(MASK);
        assert_eq!(inv.grouped(), vec![(MASK, 2), (ASPIRIN, 1)]);
    }
}
