//! rponto main entrypoint.

use rponto::run;

fn main() {
    if let Err(e) = run() {
        rponto::ui::messages::error(&e);
        std::process::exit(1);
    }
}
