// Prints each process's rank.
//
// cargo mpirun -n 4 --features mpi-support --bin rank-reporter

use cgns_vtu::algs::communicator;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let runtime = match communicator::initialize() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    println!("Hello World from processor rank: \t {}", runtime.rank());
    ExitCode::SUCCESS
}
