use crate::store::SessionStore;

/// Repository adapter over the shared in-memory store. Cheap to construct per
/// request; all clones point at the same rows.
#[derive(Clone)]
pub struct StoreRepository {
    pub store: SessionStore,
}
