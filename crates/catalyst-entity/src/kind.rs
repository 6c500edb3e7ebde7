/// Configuration value describing one entity kind.
///
/// Kinds differ only in these fields; behaviour specific to a kind (such as
/// a filtered search) is written as a free function over
/// [`Collection`](crate::Collection) primitives.
pub struct KindSpec<S> {
    /// Record kind of entity blobs (`"mentor"`).
    pub name: &'static str,
    /// Name of the kind's index record (`"mentors"`).
    pub index_name: &'static str,
    /// State returned for ids that have no blob.
    pub initial: fn() -> S,
    /// Static dataset loaded by `ensure_seed`.
    pub seed: fn() -> Vec<S>,
}

impl<S> KindSpec<S> {
    /// A kind without seed data.
    pub const fn new(name: &'static str, index_name: &'static str, initial: fn() -> S) -> Self {
        Self {
            name,
            index_name,
            initial,
            seed: Vec::new,
        }
    }

    /// Attach a seed dataset.
    pub const fn with_seed(mut self, seed: fn() -> Vec<S>) -> Self {
        self.seed = seed;
        self
    }
}

impl<S> Clone for KindSpec<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for KindSpec<S> {}

impl<S> std::fmt::Debug for KindSpec<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindSpec")
            .field("name", &self.name)
            .field("index_name", &self.index_name)
            .finish()
    }
}
