//! Platform logging initialization for wizard_app.

use super::config::Settings;

pub fn initialize(settings: &Settings) {
    wizard_logging::initialize(
        settings.log_destination,
        settings.log_level,
        &settings.log_file,
    );
}
