// Converts a CGNS mesh + solution into an ASCII .vtu grid.
//
// cargo mpirun -n 2 --features mpi-support --bin cgns-to-vtu -- --input test.cgns

use cgns_vtu::algs::communicator::{self, ParallelRuntime};
use cgns_vtu::io::vtu::VtuWriter;
use cgns_vtu::mesh_error::MeshError;
use cgns_vtu::reader::{PlexCgnsReader, ReaderOptions};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "cgns-to-vtu",
    about = "Reads a CGNS mesh and solution through the mesh library and writes an ASCII VTK unstructured grid."
)]
struct Opt {
    /// CGNS file to read
    #[arg(short, long, default_value = "test.cgns")]
    input: PathBuf,
    /// Output .vtu file (written by rank 0 only)
    #[arg(short, long, default_value = "grid.vtu")]
    output: PathBuf,
    /// Stored solution to load; negative counts from the end
    #[arg(short, long, default_value = "-1", allow_negative_numbers = true)]
    solution_index: i64,
}

fn run(opt: &Opt, runtime: &dyn ParallelRuntime) -> Result<(), MeshError> {
    let reader = PlexCgnsReader::new(ReaderOptions {
        file_name: opt.input.clone(),
        solution_index: opt.solution_index,
    });
    let grid = reader.update()?;
    if runtime.is_root() {
        VtuWriter::default().write_file(&opt.output, &grid)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let opt = Opt::parse();

    let runtime = match communicator::initialize() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    match run(&opt, runtime.as_ref()) {
        Ok(()) => {
            runtime.barrier();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("[rank {}] {e}", runtime.rank());
            eprintln!("{e}");
            if runtime.size() > 1 {
                runtime.abort(e.exit_code());
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
