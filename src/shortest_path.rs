//! All-pairs and single-source shortest paths over unit-weight edges.

pub mod distance;

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use num_traits::{PrimInt, Unsigned};

use crate::{
    error::{Error, Result},
    graph::{DirectedGraph, Graph, VertexId},
    priority_queue::PriorityQueue,
};

use distance::{Distance, DistanceMatrix};

/// Limits applied by [`ShortestPathEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest graph Floyd–Warshall will accept. The matrix needs `n²` cells
    /// and the run takes `n³` steps. `None` means unlimited.
    pub max_matrix_vertices: Option<usize>,
}

/// Runs shortest-path analyses and keeps the metrics of the last
/// Floyd–Warshall run.
///
/// `W` is the integer type used for hop counts.
#[derive(Debug, Clone)]
pub struct ShortestPathEngine<W = u32> {
    config: EngineConfig,
    diameter: W,
    average_path_length: Option<f64>,
}

impl<W: PrimInt + Unsigned + Debug> ShortestPathEngine<W> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            diameter: W::zero(),
            average_path_length: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Running maximum of the finite distances seen while relaxing in the
    /// last [`Self::floyd_warshall`] run, zero if there was none.
    ///
    /// It covers every `k` step, so a pair first reached by a long path and
    /// later shortened still contributes its longer length. The largest
    /// shortest-path distance is [`DistanceMatrix::max_finite`] of the result.
    pub fn diameter(&self) -> W {
        self.diameter
    }

    /// Mean of all finite distances found by the last
    /// [`Self::floyd_warshall`] run, `None` if there was none.
    pub fn average_path_length(&self) -> Option<f64> {
        self.average_path_length
    }

    /// All-pairs shortest paths.
    ///
    /// The diagonal is not forced to zero: `d(v, v)` is finite only when a
    /// cycle passes through `v`. Each `k` step reads the previous matrix and
    /// writes a separate one. The diameter is tracked over every step; the
    /// average path length is taken from the last step only. Both are stored
    /// on the engine.
    #[tracing::instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
    pub fn floyd_warshall<V>(&mut self, graph: &DirectedGraph<V>) -> Result<DistanceMatrix<W>> {
        let n = graph.vertex_count();
        if let Some(limit) = self.config.max_matrix_vertices {
            if n > limit {
                return Err(Error::VertexLimitExceeded { vertices: n, limit });
            }
        }

        let mut dist = DistanceMatrix::unreachable(n);
        for (u, v) in graph.edges() {
            dist.set(u, v, Distance::one());
        }

        let mut next = DistanceMatrix::unreachable(n);
        let mut diameter = W::zero();
        let mut total = 0f64;
        let mut count = 0usize;
        for k in graph.vertex_ids() {
            let last = k.index() + 1 == n;
            for j in graph.vertex_ids() {
                let (row_j, row_k) = (dist.row(j), dist.row(k));
                let via = row_j[k.index()];
                for (h, cell) in next.row_mut(j).iter_mut().enumerate() {
                    *cell = row_j[h].min(via.join(row_k[h]));
                    if let Distance::Finite(w) = *cell {
                        diameter = diameter.max(w);
                        if last {
                            total += w.to_f64().unwrap_or(f64::NAN);
                            count += 1;
                        }
                    }
                }
            }
            std::mem::swap(&mut dist, &mut next);
        }

        self.diameter = diameter;
        self.average_path_length = (count > 0).then(|| total / count as f64);
        tracing::debug!(
            diameter = ?self.diameter,
            average_path_length = ?self.average_path_length,
            finite_pairs = count,
            "floyd-warshall finished"
        );
        Ok(dist)
    }

    /// Single-source shortest paths from `source`.
    pub fn dijkstra<'g, V: Eq + Hash>(
        &self,
        graph: &'g DirectedGraph<V>,
        source: &V,
    ) -> Result<ShortestPaths<'g, V, W>> {
        let source = graph.vertex_id(source)?;
        self.dijkstra_from_id(graph, source)
    }

    /// Single-source shortest paths from the vertex with id `source`.
    ///
    /// Every vertex enters the queue up front with its initial distance;
    /// improved neighbours that are still queued get their priority lowered.
    /// The order among equally distant vertices is unspecified.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(vertices = graph.vertex_count(), %source)
    )]
    pub fn dijkstra_from_id<'g, V>(
        &self,
        graph: &'g DirectedGraph<V>,
        source: VertexId,
    ) -> Result<ShortestPaths<'g, V, W>> {
        let n = graph.vertex_count();
        if source.index() >= n {
            return Err(Error::UnknownVertexId(source));
        }

        let mut dist = vec![Distance::Unreachable; n];
        let mut prev = vec![None; n];
        dist[source.index()] = Distance::zero();

        let mut queue = PriorityQueue::with_capacity(n);
        for v in graph.vertex_ids() {
            queue.push(dist[v.index()], v.index());
        }

        while let Some(u) = queue.top() {
            let alt = dist[u].step();
            for v in graph.adjacency(VertexId::from(u)) {
                let i = v.index();
                if alt < dist[i] {
                    dist[i] = alt;
                    prev[i] = Some(VertexId::from(u));
                    if queue.contains(i) {
                        queue.change_priority(i, alt);
                    }
                }
            }
            queue.pop();
        }

        let paths = ShortestPaths {
            graph,
            source,
            dist,
            prev,
        };
        tracing::debug!(reachable = paths.reachable_count(), "dijkstra finished");
        Ok(paths)
    }
}

impl<W: PrimInt + Unsigned + Debug> Default for ShortestPathEngine<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest-path tree produced by [`ShortestPathEngine::dijkstra`].
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g, V, W = u32> {
    graph: &'g DirectedGraph<V>,
    source: VertexId,
    dist: Vec<Distance<W>>,
    prev: Vec<Option<VertexId>>,
}

impl<'g, V, W: PrimInt + Unsigned> ShortestPaths<'g, V, W> {
    pub fn source(&self) -> &'g V {
        let graph = self.graph;
        &graph[self.source]
    }

    pub fn source_id(&self) -> VertexId {
        self.source
    }

    /// Distances indexed by [`VertexId`].
    pub fn distances_by_id(&self) -> &[Distance<W>] {
        &self.dist
    }

    /// Predecessors indexed by [`VertexId`].
    pub fn predecessors_by_id(&self) -> &[Option<VertexId>] {
        &self.prev
    }

    /// Number of vertices reachable from the source, the source included.
    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_finite()).count()
    }

    /// Vertex ids on the path from the source to `target`, source first.
    pub fn path_to_id(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.dist.get(target.index())?.is_finite() {
            return None;
        }
        let mut path: Vec<_> =
            std::iter::successors(Some(target), |v| self.prev[v.index()]).collect();
        path.reverse();
        Some(path)
    }
}

impl<'g, V: Eq + Hash, W: PrimInt + Unsigned> ShortestPaths<'g, V, W> {
    pub fn distance(&self, v: &V) -> Result<Distance<W>> {
        let id = self.graph.vertex_id(v)?;
        Ok(self.dist[id.index()])
    }

    /// Vertex preceding `v` on its shortest path, `None` for the source and
    /// for unreachable vertices.
    pub fn predecessor(&self, v: &V) -> Result<Option<&'g V>> {
        let graph = self.graph;
        let id = graph.vertex_id(v)?;
        Ok(self.prev[id.index()].map(|p| &graph[p]))
    }

    /// Vertices on the shortest path from the source to `target`, source
    /// first. `None` if `target` is unreachable.
    pub fn path_to(&self, target: &V) -> Result<Option<Vec<&'g V>>> {
        let graph = self.graph;
        let id = graph.vertex_id(target)?;
        Ok(self
            .path_to_id(id)
            .map(|path| path.into_iter().map(|v| &graph[v]).collect()))
    }

    pub fn distances(&self) -> HashMap<&'g V, Distance<W>> {
        let graph = self.graph;
        graph.vertices().zip(self.dist.iter().copied()).collect()
    }

    pub fn predecessors(&self) -> HashMap<&'g V, Option<&'g V>> {
        let graph = self.graph;
        graph
            .vertices()
            .zip(&self.prev)
            .map(|(v, p)| (v, p.map(|p| &graph[p])))
            .collect()
    }
}

#[cfg(test)]
mod test {
    #[allow(unused_imports)]
    use super::*;
    use crate::graph::bench::random_graph;

    fn chain() -> DirectedGraph<u32> {
        let mut graph = DirectedGraph::new();
        for v in 1..=3 {
            graph.add_vertex(v);
        }
        graph.add_edge(&1, &2).unwrap();
        graph.add_edge(&2, &3).unwrap();
        graph
    }

    fn id(graph: &DirectedGraph<u32>, v: u32) -> VertexId {
        graph.vertex_id(&v).unwrap()
    }

    #[test]
    fn floyd_warshall_chain() {
        let graph = chain();
        let mut engine = ShortestPathEngine::<u32>::new();
        let m = engine.floyd_warshall(&graph).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(id(&graph, 1), id(&graph, 3)), Distance::Finite(2));
        assert_eq!(m.get(id(&graph, 1), id(&graph, 2)), Distance::Finite(1));
        assert_eq!(m.get(id(&graph, 1), id(&graph, 1)), Distance::Unreachable);
        assert_eq!(m.get(id(&graph, 3), id(&graph, 1)), Distance::Unreachable);
        assert_eq!(engine.diameter(), 2);
        assert_eq!(engine.average_path_length(), Some(4.0 / 3.0));
    }

    #[test]
    fn floyd_warshall_cycle_diagonal() {
        let mut graph = chain();
        graph.add_edge(&3, &1).unwrap();
        let mut engine = ShortestPathEngine::<u32>::new();
        let m = engine.floyd_warshall(&graph).unwrap();
        for v in 1..=3 {
            assert_eq!(m.get(id(&graph, v), id(&graph, v)), Distance::Finite(3));
        }
        assert_eq!(m.get(id(&graph, 3), id(&graph, 2)), Distance::Finite(2));
        assert_eq!(engine.diameter(), 3);
    }

    #[test]
    fn floyd_warshall_diameter_is_running_max() {
        // 1 -> 2 -> 3 -> 4 is found before the shorter 1 -> 5 -> 4
        let mut graph = DirectedGraph::new();
        for v in 1..=5u32 {
            graph.add_vertex(v);
        }
        for (u, v) in [(1, 2), (2, 3), (3, 4), (1, 5), (5, 4)] {
            graph.add_edge(&u, &v).unwrap();
        }
        let mut engine = ShortestPathEngine::<u32>::new();
        let m = engine.floyd_warshall(&graph).unwrap();
        assert_eq!(m.get(id(&graph, 1), id(&graph, 4)), Distance::Finite(2));
        assert_eq!(engine.diameter(), 3);
        assert_eq!(m.max_finite(), 2);
        assert_eq!(engine.average_path_length(), m.mean_finite());
    }

    #[test]
    fn floyd_warshall_empty() {
        let graph = DirectedGraph::<u32>::new();
        let mut engine = ShortestPathEngine::<u32>::new();
        let m = engine.floyd_warshall(&graph).unwrap();
        assert_eq!(m.size(), 0);
        assert_eq!(engine.diameter(), 0);
        assert_eq!(engine.average_path_length(), None);

        let mut graph = DirectedGraph::new();
        graph.add_vertex(7u32);
        engine.floyd_warshall(&graph).unwrap();
        assert_eq!(engine.average_path_length(), None);
    }

    #[test]
    fn floyd_warshall_limit() {
        let graph = chain();
        let mut engine = ShortestPathEngine::<u32>::with_config(EngineConfig {
            max_matrix_vertices: Some(2),
        });
        assert_eq!(
            engine.floyd_warshall(&graph),
            Err(Error::VertexLimitExceeded {
                vertices: 3,
                limit: 2
            })
        );
    }

    #[test]
    fn floyd_warshall_matches_bfs() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let graph = random_graph(12, 0.15, &mut rng);
            let mut engine = ShortestPathEngine::<u16>::new();
            let m = engine.floyd_warshall(&graph).unwrap();
            for u in graph.vertex_ids() {
                let hops = graph.hop_counts(u).unwrap();
                for v in graph.vertex_ids() {
                    let expected = if u == v {
                        // shortest cycle back to u
                        graph
                            .vertex_ids()
                            .filter(|&w| graph.adjacency(w).any(|x| x == u))
                            .filter_map(|w| hops[w.index()])
                            .min()
                            .map_or(Distance::Unreachable, |h| {
                                Distance::Finite(h as u16 + 1)
                            })
                    } else {
                        hops[v.index()]
                            .map_or(Distance::Unreachable, |h| Distance::Finite(h as u16))
                    };
                    assert_eq!(m.get(u, v), expected);
                }
            }
            assert!(engine.diameter() >= m.max_finite());
            assert_eq!(engine.average_path_length(), m.mean_finite());
        }
    }

    #[test]
    fn dijkstra_chain() {
        let mut graph = chain();
        graph.add_vertex(4);
        let engine = ShortestPathEngine::<u32>::new();
        let paths = engine.dijkstra(&graph, &1).unwrap();
        assert_eq!(*paths.source(), 1);
        assert_eq!(paths.distance(&1), Ok(Distance::Finite(0)));
        assert_eq!(paths.distance(&2), Ok(Distance::Finite(1)));
        assert_eq!(paths.distance(&3), Ok(Distance::Finite(2)));
        assert_eq!(paths.distance(&4), Ok(Distance::Unreachable));
        assert_eq!(paths.predecessor(&1), Ok(None));
        assert_eq!(paths.predecessor(&2), Ok(Some(&1)));
        assert_eq!(paths.predecessor(&3), Ok(Some(&2)));
        assert_eq!(paths.predecessor(&4), Ok(None));
        assert_eq!(paths.path_to(&3), Ok(Some(vec![&1, &2, &3])));
        assert_eq!(paths.path_to(&4), Ok(None));
        assert_eq!(paths.reachable_count(), 3);
        assert_eq!(paths.distance(&9), Err(Error::VertexNotFound));
    }

    #[test]
    fn dijkstra_missing_source() {
        let graph = chain();
        let engine = ShortestPathEngine::<u32>::new();
        assert!(matches!(engine.dijkstra(&graph, &9), Err(Error::VertexNotFound)));
        assert!(matches!(
            engine.dijkstra_from_id(&graph, VertexId::from(3)),
            Err(Error::UnknownVertexId(_))
        ));
    }

    #[test]
    fn dijkstra_deterministic() {
        let mut rng = rand::thread_rng();
        let graph = random_graph(40, 0.08, &mut rng);
        let engine = ShortestPathEngine::<u32>::new();
        let a = engine.dijkstra(&graph, &0).unwrap();
        let b = engine.dijkstra(&graph, &0).unwrap();
        assert_eq!(a.distances(), b.distances());
        assert_eq!(a.predecessors(), b.predecessors());
    }

    #[test]
    fn dijkstra_matches_bfs() {
        let mut rng = rand::thread_rng();
        let graph = random_graph(50, 0.05, &mut rng);
        let engine = ShortestPathEngine::<u32>::new();
        for s in graph.vertex_ids() {
            let paths = engine.dijkstra_from_id(&graph, s).unwrap();
            let hops = graph.hop_counts(s).unwrap();
            for v in graph.vertex_ids() {
                let d = paths.distances_by_id()[v.index()];
                assert_eq!(d.finite().map(|w| w as usize), hops[v.index()]);
                if let Some(p) = paths.predecessors_by_id()[v.index()] {
                    assert!(graph.adjacency(p).any(|x| x == v));
                    assert_eq!(paths.distances_by_id()[p.index()].step(), d);
                }
            }
        }
    }
}
