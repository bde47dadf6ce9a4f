use bough_lang_printer::{ColorChoice, PrintCfg};

/// Settings of a [crate::Session].
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether rendered reports use colours
    pub colorize: ColorChoice,
    /// Whether metavariables left without a solution fail a definition
    pub report_unresolved: bool,
    /// How terms in the diagnostic log are printed
    pub print: PrintCfg,
}

impl Default for Config {
    fn default() -> Self {
        Self { colorize: ColorChoice::Auto, report_unresolved: true, print: PrintCfg::default() }
    }
}
