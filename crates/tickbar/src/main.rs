//! tickbar: console progress bar with a blended ETC.

use tickbar_cli::ui::print_error;
use tickbar_lib::{app, config, errors, logging};

fn main() {
    logging::init();

    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        print_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
