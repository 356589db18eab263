//! Disjoint-set forest with path compression and union by size.

#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl UnionFind {
    /// `len` singleton sets, one per element.
    pub fn new(len: usize) -> Self {
        Self { parent: (0..len).collect(), size: vec![1; len], count: len }
    }

    /// Root of the set containing `element`, halving the path on the way up.
    pub fn find(&mut self, mut element: usize) -> usize {
        while element != self.parent[element] {
            self.parent[element] = self.parent[self.parent[element]];
            element = self.parent[element];
        }
        element
    }

    /// Merges the two sets, hanging the smaller tree under the larger root. Returns
    /// `false` when both elements were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let (small, large) =
            if self.size[root_a] < self.size[root_b] { (root_a, root_b) } else { (root_b, root_a) };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.count -= 1;
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
