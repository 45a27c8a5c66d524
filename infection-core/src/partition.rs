use crate::{HashMap, Result, SelectionError};
use ahash::RandomState;
use std::hash::Hash;
use tracing::debug;

/// Entities that are all reachable from each other through the adjacency relation.
pub type Group<T> = Vec<T>;

struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }
}

/// Splits `population` into its connected groups.
///
/// Edges only need to be declared from one side; the graph is treated as
/// undirected. Self edges, repeated edges and repeated population entries are
/// harmless. An edge to an entity missing from the population is a
/// [`SelectionError::ContractViolation`].
///
/// Groups come out in the order their first member appears in `population`,
/// members in population order.
pub fn partition<T, F, I>(population: &[T], adjacency: F) -> Result<Vec<Group<T>>>
where
    T: Eq + Hash + Clone,
    F: Fn(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<&T, usize> =
        HashMap::with_capacity_and_hasher(population.len(), RandomState::new());
    let mut members: Vec<&T> = Vec::with_capacity(population.len());
    for entity in population {
        index.entry(entity).or_insert_with(|| {
            members.push(entity);
            members.len() - 1
        });
    }

    let mut sets = DisjointSet::new(members.len());
    let mut num_edges = 0usize;
    for (position, entity) in members.iter().enumerate() {
        for neighbour in adjacency(*entity) {
            let other = *index.get(&neighbour).ok_or_else(|| {
                SelectionError::ContractViolation(format!(
                    "entity #{} is adjacent to an entity outside the population",
                    position
                ))
            })?;
            sets.union(position, other);
            num_edges += 1;
        }
    }

    let mut slot: Vec<Option<usize>> = vec![None; members.len()];
    let mut groups: Vec<Group<T>> = Vec::new();
    for (position, entity) in members.iter().enumerate() {
        let root = sets.find(position);
        let group = *slot[root].get_or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group].push((*entity).clone());
    }

    debug!(
        num_entities = members.len(),
        num_edges,
        num_groups = groups.len(),
        "population partitioned"
    );
    Ok(groups)
}
