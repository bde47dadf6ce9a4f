use crate::PrintCfg;

use super::Print;
use super::PrintExt;

/// Width used by [PrintToString::print_trace], wide enough to keep a term on one line.
const TRACE_WIDTH: usize = 1 << 16;

pub trait PrintToString {
    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String;

    /// Print on a single line, for log messages.
    fn print_trace(&self) -> String {
        let cfg = PrintCfg { width: TRACE_WIDTH, ..Default::default() };
        self.print_to_string(Some(&cfg))
    }
}

impl<T: Print + ?Sized> PrintToString for T {
    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String {
        let mut buf = Vec::new();
        let def = PrintCfg::default();
        let cfg = cfg.unwrap_or(&def);
        <T as PrintExt>::print(self, cfg, &mut buf).expect("Failed to print to string");
        String::from_utf8_lossy(&buf).into_owned()
    }
}
