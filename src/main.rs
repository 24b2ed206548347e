use std::process::exit;

use colored::Colorize;

fn main() {
    match order_viewer::app::run_cli() {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{} {}", "error:".bold().red(), e);
            exit(2);
        }
    }
}
