/// Adjacency view over densely indexed vertices.
///
/// Indices must lie in `0..vertex_count()`.
pub trait Graph<IdxV> {
    fn vertex_count(&self) -> usize;
    fn adjacency(&self, v: IdxV) -> impl Iterator<Item = IdxV>;

    fn edges(&self) -> impl Iterator<Item = (IdxV, IdxV)>
    where
        IdxV: Copy + From<usize>,
    {
        (0..self.vertex_count()).flat_map(move |u| {
            let u = IdxV::from(u);
            self.adjacency(u).map(move |v| (u, v))
        })
    }
}
