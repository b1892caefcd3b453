//! Version command

use crate::app::{AppContext, OutputMode};

/// Run the version command.
pub fn run(app: &AppContext) {
    let version = env!("CARGO_PKG_VERSION");

    match app.mode {
        OutputMode::Json => println!(r#"{{"version":"{version}"}}"#),
        OutputMode::Human => println!("flannel-charm {version}"),
    }
}
