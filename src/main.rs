use std::process::ExitCode;

fn main() -> ExitCode {
    match dotfiles_topics::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
