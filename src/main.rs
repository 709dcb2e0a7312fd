use profile_check::check_profile_file;
use profile_check::config;
use profile_check::logging;
use profile_check::output::{print_error, print_report};
use profile_check::profile_path;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    logging::init(config::LOG_CONFIG_FILE)?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let path = profile_path(std::env::args().nth(1));
    match check_profile_file(&path) {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    }
}
