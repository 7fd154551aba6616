use std::process::ExitCode;

fn main() -> ExitCode {
    bonbon_cli::run()
}
