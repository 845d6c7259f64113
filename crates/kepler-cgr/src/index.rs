//! By-origin-node adjacency over a contact plan
//!
//! The plan itself is a flat, random-accessible slice of contacts. The
//! [`NeighborIndex`] groups contact *indices* by origin node so the search
//! can expand successors in O(out-degree). Node identifiers are dense small
//! integers; the table is sized by the maximum node referenced anywhere in
//! the plan.
//!
//! The index stays valid as long as plan membership and order do not
//! change. Mutating residual capacity alone does not invalidate it; adding
//! or removing contacts requires a rebuild.

use kepler_core::Contact;

/// Contact indices grouped by origin node.
#[derive(Debug, Clone, Default)]
pub struct NeighborIndex {
    by_from: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Build the index from a plan. O(N) over contacts.
    pub fn build(plan: &[Contact]) -> Self {
        let max_node = plan
            .iter()
            .map(|c| c.from.max(c.to))
            .max()
            .unwrap_or(0) as usize;

        let mut by_from = vec![Vec::new(); if plan.is_empty() { 0 } else { max_node + 1 }];
        for (i, c) in plan.iter().enumerate() {
            by_from[c.from as usize].push(i);
        }
        Self { by_from }
    }

    /// Number of node slots in the table (max referenced node + 1).
    pub fn node_count(&self) -> usize {
        self.by_from.len()
    }

    /// Whether `node` fits in the table.
    pub fn contains_node(&self, node: u32) -> bool {
        (node as usize) < self.by_from.len()
    }

    /// Indices of contacts departing `node`. Empty for out-of-table nodes.
    pub fn departing(&self, node: u32) -> &[usize] {
        self.by_from
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: u32, from: u32, to: u32) -> Contact {
        Contact {
            id,
            from,
            to,
            t_start: 0.0,
            t_end: 60.0,
            owlt: 0.02,
            rate_bps: 1e7,
            setup_s: 0.1,
            residual_bytes: 1e8,
        }
    }

    #[test]
    fn test_build_groups_by_origin() {
        let plan = vec![
            contact(0, 100, 1),
            contact(1, 1, 200),
            contact(2, 100, 2),
            contact(3, 2, 200),
        ];
        let index = NeighborIndex::build(&plan);

        assert_eq!(index.node_count(), 201);
        assert_eq!(index.departing(100), &[0, 2]);
        assert_eq!(index.departing(1), &[1]);
        assert_eq!(index.departing(2), &[3]);
        assert!(index.departing(200).is_empty());
    }

    #[test]
    fn test_empty_plan() {
        let index = NeighborIndex::build(&[]);
        assert_eq!(index.node_count(), 0);
        assert!(!index.contains_node(0));
        assert!(index.departing(0).is_empty());
    }

    #[test]
    fn test_out_of_table_node() {
        let index = NeighborIndex::build(&[contact(0, 1, 2)]);
        assert!(index.contains_node(2));
        assert!(!index.contains_node(3));
        assert!(index.departing(99).is_empty());
    }

    #[test]
    fn test_table_sized_by_destination_node() {
        // `to` can exceed every `from`; the table must still cover it
        let index = NeighborIndex::build(&[contact(0, 1, 500)]);
        assert_eq!(index.node_count(), 501);
        assert!(index.contains_node(500));
    }
}
