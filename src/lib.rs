//! Directed graphs with all-pairs and single-source shortest paths.
//!
//! [`DirectedGraph`] stores arbitrary `Eq + Hash` vertex values and hands out
//! dense [`VertexId`]s. [`ShortestPathEngine`] runs Floyd–Warshall over the
//! whole graph (distance matrix, diameter, average path length) and Dijkstra
//! from a single source (shortest-path tree).
//!
//! ```
//! use graph_metrics::{DirectedGraph, Distance, ShortestPathEngine};
//!
//! let mut graph = DirectedGraph::new();
//! for movie in ["alien", "aliens", "prometheus"] {
//!     graph.add_vertex(movie);
//! }
//! graph.add_edge(&"alien", &"aliens")?;
//! graph.add_edge(&"aliens", &"prometheus")?;
//!
//! let mut engine = ShortestPathEngine::<u32>::new();
//! engine.floyd_warshall(&graph)?;
//! assert_eq!(engine.diameter(), 2);
//!
//! let paths = engine.dijkstra(&graph, &"alien")?;
//! assert_eq!(paths.distance(&"prometheus")?, Distance::Finite(2));
//! # Ok::<(), graph_metrics::Error>(())
//! ```

pub mod error;
pub mod graph;
pub mod priority_queue;
pub mod shortest_path;

pub use error::{Error, Result};
pub use graph::{DirectedGraph, VertexId};
pub use priority_queue::PriorityQueue;
pub use shortest_path::{
    distance::{Distance, DistanceMatrix},
    EngineConfig, ShortestPathEngine, ShortestPaths,
};
