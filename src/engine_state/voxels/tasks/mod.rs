//! # Voxel Task System
//!
//! Background tasks that operate on voxel data. Each task runs on its own
//! thread through [`TaskHandle`](crate::engine_state::task_management::TaskHandle).

pub mod chunk_mesh_build_task;

pub use chunk_mesh_build_task::MeshBuildTask;
