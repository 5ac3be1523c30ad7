//! # Voxel World Entry Point
//!
//! Runs a headless session of the world core. An optional first argument
//! names a JSON configuration file.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

use std::{path::PathBuf, process::ExitCode};

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    match voxel_world::run(config_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
