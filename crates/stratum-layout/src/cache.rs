//! Memoized descriptors keyed by schema identity.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use crate::descriptor::LayoutBuilder;
use crate::error::LayoutResult;

/// Shares finalized descriptors between everyone who declares the same schema.
///
/// The key is the builder itself: label, mode-specific configuration, and the
/// ordered field list. Lookups are safe from any thread; for a given key,
/// `finalize` runs at most once while it keeps succeeding, and every caller
/// receives the same `Arc`. Failed finalizations are not cached.
pub struct LayoutCache<B: LayoutBuilder> {
    entries: Mutex<HashMap<B, Arc<B::Output>>>,
}

impl<B> LayoutCache<B>
where
    B: LayoutBuilder + Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    /// Returns the cached descriptor for `builder`, finalizing it on first use.
    pub fn get_or_finalize(&self, builder: B) -> LayoutResult<Arc<B::Output>> {
        // Finalize runs under the lock: one finalize per key.
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(found) = entries.get(&builder) {
            log::debug!("layout cache hit");
            return Ok(Arc::clone(found));
        }

        log::debug!("layout cache miss; finalizing");
        let output = Arc::new(builder.clone().finalize()?);
        entries.insert(builder, Arc::clone(&output));
        Ok(output)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<B> Default for LayoutCache<B>
where
    B: LayoutBuilder + Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::structs::StructLayoutBuilder;
    use crate::types::{UniformType, VertexFormat};
    use crate::usage::StepMode;
    use crate::vertex::VertexLayoutBuilder;

    fn camera() -> StructLayoutBuilder {
        StructLayoutBuilder::new("camera")
            .field("view_proj", UniformType::Mat4x4f)
            .field("eye", UniformType::Vec3f)
    }

    #[test]
    fn same_schema_shares_one_descriptor() {
        let cache = LayoutCache::new();
        let a = cache.get_or_finalize(camera()).unwrap();
        let b = cache.get_or_finalize(camera()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn field_order_is_part_of_the_key() {
        let cache = LayoutCache::new();
        let a = cache.get_or_finalize(camera()).unwrap();
        let b = cache
            .get_or_finalize(
                StructLayoutBuilder::new("camera")
                    .field("eye", UniformType::Vec3f)
                    .field("view_proj", UniformType::Mat4x4f),
            )
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache: LayoutCache<VertexLayoutBuilder> = LayoutCache::new();
        let incomplete = VertexLayoutBuilder::new("v").field(0, "pos", VertexFormat::Float32x2);
        assert!(cache.get_or_finalize(incomplete).is_err());
        assert!(cache.is_empty());

        let ok = VertexLayoutBuilder::begin("v", 4, StepMode::Vertex)
            .field(0, "pos", VertexFormat::Float32x2);
        assert_eq!(cache.get_or_finalize(ok).unwrap().stride(), 8);
    }

    #[test]
    fn concurrent_lookups_see_one_instance() {
        let cache: Arc<LayoutCache<StructLayoutBuilder>> = Arc::new(LayoutCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_finalize(camera()).unwrap())
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }
}
