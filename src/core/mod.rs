//! # Core Module
//!
//! This module provides the concurrency primitives shared by the rest of the crate.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking
//! - `WeakMtResource`: Non-owning handle to an `MtResource`, used for chunk neighbor links
//!
//! ## Usage
//! ```
//! use voxel_world::core::MtResource;
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::{MtResource, WeakMtResource};
