//! Bucket sort, union-find, and Kruskal's minimum spanning tree over
//! region connections.

use super::Connection;

/// Sorts connections by ascending distance.
///
/// Connections are distributed into buckets keyed on `floor(distance)`.
/// Distances are bounded by the grid diagonal, so the bucket count is too and
/// the pass is linear in the number of connections. Buckets are small and are
/// finished with a stable sort on the exact distance.
pub fn sort_by_distance(connections: Vec<Connection>) -> Vec<Connection> {
    let Some(max_distance) = connections.iter().map(Connection::distance).reduce(f64::max) else {
        return connections;
    };
    let total = connections.len();
    let mut buckets: Vec<Vec<Connection>> = vec![Vec::new(); max_distance as usize + 1];
    for connection in connections {
        buckets[connection.distance() as usize].push(connection);
    }

    let mut sorted = Vec::with_capacity(total);
    for mut bucket in buckets {
        bucket.sort_by(Connection::cmp_distance);
        sorted.append(&mut bucket);
    }
    sorted
}

/// Disjoint-set forest with union by rank and path compression.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Number of disjoint sets remaining.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the representative of `item`'s set, compressing the path.
    pub fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = item;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets holding `a` and `b`. Returns `false` if they were
    /// already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.components -= 1;
        true
    }
}

/// Kruskal's algorithm over `region_count` vertices.
///
/// `sorted` must already be in ascending distance order (see
/// [`sort_by_distance`]). A connection is kept when it joins two components
/// that were still apart. Stops as soon as a single component remains.
pub fn minimum_spanning_tree(
    region_count: usize,
    sorted: impl IntoIterator<Item = Connection>,
) -> Vec<Connection> {
    let mut sets = DisjointSet::new(region_count);
    let mut tree = Vec::with_capacity(region_count.saturating_sub(1));
    for connection in sorted {
        if sets.components() <= 1 {
            break;
        }
        let (a, b) = connection.regions();
        if sets.union(a, b) {
            tree.push(connection);
        }
    }
    tree
}
