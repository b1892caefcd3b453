//! Terminal colors for operator output.

use owo_colors::Style;

/// Stylesheet for the operator CLI. Every style is plain until
/// [`Styles::colored`] is used.
#[derive(Default, Clone, Copy)]
pub struct Styles {
    /// Completed steps
    pub success: Style,
    pub warning: Style,
    /// Failed steps and fatal errors
    pub error: Style,
    pub info: Style,
    /// Labels in key/value lines
    pub dim: Style,
    /// Hook name or flag file path above a listing
    pub header: Style,
}

impl Styles {
    /// Stylesheet used on a color-capable terminal.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
        }
    }
}
