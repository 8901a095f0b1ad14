use std::process::ExitCode;

use gitlink::ui::output;

fn main() -> ExitCode {
    match gitlink::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
