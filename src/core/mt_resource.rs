use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` provides synchronized access to a value of type `T` that can be shared
/// across threads. It uses an `Arc<RwLock<T>>` internally to manage concurrent access.
/// In the voxel world it holds a chunk's voxel field, which is shared between the owning
/// chunk and at most one in-flight mesh build thread.
///
/// # Type Parameters
/// - `T`: The type of the contained resource, must be `Send + Sync`
///
/// # Examples
///
/// ```
/// use voxel_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let counter_clone = counter.clone();
///
/// let handle = std::thread::spawn(move || {
///     *counter_clone.get_mut() += 1;
/// });
///
/// handle.join().unwrap();
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// # Performance Considerations
/// - Read operations (`get()`) can occur concurrently
/// - Write operations (`get_mut()`) are exclusive and will block other operations
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync> MtResource<T> {
    /// Creates a new `MtResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard that allows reading the contained value.
    ///
    /// A poisoned lock is recovered rather than propagated.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a non-owning handle to the same resource.
    ///
    /// Used for chunk neighbor links: a neighbor never keeps another chunk's
    /// field alive.
    pub fn downgrade(&self) -> WeakMtResource<T> {
        WeakMtResource {
            resource: Arc::downgrade(&self.resource),
        }
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

/// Non-owning counterpart of [`MtResource`].
pub struct WeakMtResource<T: Send + Sync> {
    resource: Weak<RwLock<T>>,
}

impl<T: Send + Sync> WeakMtResource<T> {
    /// Attempts to recover a strong handle. Returns `None` once the owner is gone.
    pub fn upgrade(&self) -> Option<MtResource<T>> {
        self.resource
            .upgrade()
            .map(|resource| MtResource { resource })
    }
}

impl<T: Send + Sync> Clone for WeakMtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: Send + Sync> fmt::Debug for WeakMtResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakMtResource")
            .field("alive", &(self.resource.strong_count() > 0))
            .finish()
    }
}
