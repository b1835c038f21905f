pub mod traits;

use std::{
    collections::{HashMap, VecDeque},
    fmt::{self, Display},
    hash::Hash,
    ops::Index,
};

use crate::error::{Error, Result};

pub use traits::Graph;

/// Dense index of a vertex inside one [`DirectedGraph`].
///
/// Ids are handed out in insertion order starting at 0 and stay valid until
/// the graph is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Directed graph over arbitrary vertex values, stored as adjacency lists.
///
/// Every vertex value is mapped to a [`VertexId`]; the algorithms in
/// [`crate::shortest_path`] work on those ids and translate back to values
/// when reporting. Parallel edges are never stored.
#[derive(Debug, Clone)]
pub struct DirectedGraph<V> {
    edges: Vec<Vec<VertexId>>,
    vertices: Vec<V>,
    index: HashMap<V, VertexId>,
    edge_count: usize,
}

impl<V> DirectedGraph<V> {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            vertices: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
        }
    }

    pub fn reserved(vertices: usize) -> Self {
        Self {
            edges: Vec::with_capacity(vertices),
            vertices: Vec::with_capacity(vertices),
            index: HashMap::with_capacity(vertices),
            edge_count: 0,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Removes every vertex and edge. Previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
        self.index.clear();
        self.edge_count = 0;
    }

    /// All vertex values, in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> {
        self.vertices.iter()
    }

    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.vertices.get(id.0)
    }

    fn check_id(&self, id: VertexId) -> Result<VertexId> {
        if id.0 < self.vertices.len() {
            Ok(id)
        } else {
            Err(Error::UnknownVertexId(id))
        }
    }

    /// Adds the edge `from -> to` between two existing ids.
    ///
    /// Returns `Ok(false)` if the edge was already present.
    pub fn add_edge_by_id(&mut self, from: VertexId, to: VertexId) -> Result<bool> {
        self.check_id(from)?;
        self.check_id(to)?;
        let list = &mut self.edges[from.0];
        if list.contains(&to) {
            tracing::debug!(%from, %to, "edge already exists");
            return Ok(false);
        }
        list.push(to);
        self.edge_count += 1;
        Ok(true)
    }

    pub fn neighbor_ids(&self, v: VertexId) -> Result<&[VertexId]> {
        self.check_id(v)?;
        Ok(&self.edges[v.0])
    }

    pub fn bfs(&self, start: VertexId) -> Bfs {
        let mut visited = vec![false; self.vertices.len()];
        let current = (start.0 < visited.len()).then(|| {
            visited[start.0] = true;
            start
        });
        Bfs {
            visited,
            queue: VecDeque::new(),
            current,
        }
    }

    /// Unweighted hop distance from `start` to every vertex, `None` when
    /// unreachable. `start` itself is at distance 0.
    pub fn hop_counts(&self, start: VertexId) -> Result<Vec<Option<usize>>> {
        self.check_id(start)?;
        let mut hops = vec![None; self.vertices.len()];
        let mut queue = VecDeque::from([start]);
        hops[start.0] = Some(0);
        while let Some(current) = queue.pop_front() {
            let next = hops[current.0].map(|h| h + 1);
            for &to in &self.edges[current.0] {
                if hops[to.0].is_none() {
                    hops[to.0] = next;
                    queue.push_back(to);
                }
            }
        }
        Ok(hops)
    }
}

impl<V: Eq + Hash> DirectedGraph<V> {
    pub fn contains_node(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    pub fn vertex_id(&self, v: &V) -> Result<VertexId> {
        self.index.get(v).copied().ok_or(Error::VertexNotFound)
    }

    /// Adds a vertex with no outgoing edges. Adding a vertex twice has no
    /// effect and returns the id it already had.
    pub fn add_vertex(&mut self, v: V) -> VertexId
    where
        V: Clone,
    {
        if let Some(&id) = self.index.get(&v) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.index.insert(v.clone(), id);
        self.vertices.push(v);
        self.edges.push(Vec::new());
        id
    }

    /// Adds the edge `from -> to`. Both endpoints must already be vertices
    /// of the graph.
    ///
    /// Returns `Ok(false)` without touching the graph if the edge exists.
    pub fn add_edge(&mut self, from: &V, to: &V) -> Result<bool> {
        let from = self.vertex_id(from)?;
        let to = self.vertex_id(to)?;
        self.add_edge_by_id(from, to)
    }

    /// Out-neighbours of `v` in the order their edges were added.
    pub fn neighbors(&self, v: &V) -> Result<impl ExactSizeIterator<Item = &V>> {
        let id = self.vertex_id(v)?;
        Ok(self.edges[id.0].iter().map(|to| &self.vertices[to.0]))
    }

    pub fn edge_exists(&self, from: &V, to: &V) -> Result<bool> {
        let from = self.vertex_id(from)?;
        let to = self.vertex_id(to)?;
        Ok(self.edges[from.0].contains(&to))
    }

    /// Out-degree of `v`.
    pub fn degree(&self, v: &V) -> Result<usize> {
        let id = self.vertex_id(v)?;
        Ok(self.edges[id.0].len())
    }
}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// # Panics
///
/// Panics if `id` does not belong to this graph; [`DirectedGraph::vertex`]
/// is the checked form.
impl<V> Index<VertexId> for DirectedGraph<V> {
    type Output = V;

    fn index(&self, id: VertexId) -> &V {
        &self.vertices[id.0]
    }
}

impl<V> Graph<VertexId> for DirectedGraph<V> {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// # Panics
    ///
    /// Panics if `v` does not belong to this graph; use
    /// [`DirectedGraph::neighbor_ids`] for a checked lookup.
    fn adjacency(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        self.edges[v.0].iter().copied()
    }
}

/// Renders one line per vertex, e.g. `4 --> [0, 3, 7]`.
impl<V: Display> Display for DirectedGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (v, list) in self.vertices.iter().zip(&self.edges) {
            write!(f, "{v} --> [")?;
            for (i, to) in list.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.vertices[to.0])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Breadth-first walk started by [`DirectedGraph::bfs`].
pub struct Bfs {
    visited: Vec<bool>,
    queue: VecDeque<VertexId>,
    current: Option<VertexId>,
}

impl Bfs {
    pub fn next<V>(&mut self, graph: &DirectedGraph<V>) -> Option<VertexId> {
        self.current.map(|current| {
            self.queue
                .extend(graph.edges[current.0].iter().copied().filter(|to| {
                    if self.visited[to.0] {
                        false
                    } else {
                        self.visited[to.0] = true;
                        true
                    }
                }));
            self.current = self.queue.pop_front();
            current
        })
    }
}

pub mod bench {
    use super::*;
    use rand::Rng;

    /// Directed graph over the values `0..n` where each ordered pair
    /// `(u, v)`, `u != v`, is an edge with probability `p`.
    pub fn random_graph<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> DirectedGraph<usize> {
        let mut graph = DirectedGraph::reserved(n);
        for v in 0..n {
            graph.add_vertex(v);
        }
        for u in 0..n {
            for v in 0..n {
                if u != v && rng.gen_bool(p) {
                    graph.edges[u].push(VertexId(v));
                    graph.edge_count += 1;
                }
            }
        }
        graph
    }
}
