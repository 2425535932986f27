//! Process-level parallel runtime: rank, size, barrier.
//!
//! The runtime is acquired once at program start and released when the
//! handle drops, so teardown runs on every exit path including early
//! `?` returns.

use crate::mesh_error::MeshError;

/// Minimal view of the parallel runtime used by the binaries.
pub trait ParallelRuntime {
    /// This process's rank in the world communicator.
    fn rank(&self) -> usize;
    /// Number of processes in the world communicator.
    fn size(&self) -> usize;
    /// Collective barrier; every rank must call it.
    fn barrier(&self);

    /// Terminate every rank of the job with `code`.
    fn abort(&self, code: i32) -> !;

    /// Only rank 0 serializes output.
    fn is_root(&self) -> bool {
        self.rank() == 0
    }
}

/// Single-process runtime for serial runs and tests.
#[derive(Clone, Debug, Default)]
pub struct SerialRuntime;

impl ParallelRuntime for SerialRuntime {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn barrier(&self) {}
    fn abort(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}

// --- MPI backend (feature = "mpi-support") ---
#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::*;
    use mpi::environment::Universe;
    use mpi::topology::SimpleCommunicator;
    use mpi::traits::*;

    /// Owns the MPI universe; `MPI_Finalize` runs when this drops.
    pub struct MpiRuntime {
        // Field order matters: the communicator handle must drop before
        // the universe finalizes MPI.
        world: SimpleCommunicator,
        _universe: Universe,
    }

    impl MpiRuntime {
        /// Initialize MPI. Fails if it is already initialized.
        pub fn initialize() -> Result<Self, MeshError> {
            let universe = mpi::initialize()
                .ok_or_else(|| MeshError::Runtime("MPI already initialized".into()))?;
            let world = universe.world();
            log::debug!("MPI initialized: rank {} of {}", world.rank(), world.size());
            Ok(Self {
                world,
                _universe: universe,
            })
        }
    }

    impl ParallelRuntime for MpiRuntime {
        fn rank(&self) -> usize {
            self.world.rank() as usize
        }
        fn size(&self) -> usize {
            self.world.size() as usize
        }
        fn barrier(&self) {
            self.world.barrier();
        }
        fn abort(&self, code: i32) -> ! {
            self.world.abort(code)
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiRuntime;

/// Start the runtime selected at build time.
#[cfg(feature = "mpi-support")]
pub fn initialize() -> Result<Box<dyn ParallelRuntime>, MeshError> {
    Ok(Box::new(MpiRuntime::initialize()?))
}

/// Start the runtime selected at build time.
#[cfg(not(feature = "mpi-support"))]
pub fn initialize() -> Result<Box<dyn ParallelRuntime>, MeshError> {
    Ok(Box::new(SerialRuntime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_runtime_is_root() {
        let rt = SerialRuntime;
        assert_eq!(rt.rank(), 0);
        assert_eq!(rt.size(), 1);
        assert!(rt.is_root());
        rt.barrier();
    }
}
