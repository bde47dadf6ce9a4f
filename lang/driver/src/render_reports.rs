use std::fmt;
use std::io;

use miette::Report;

use bough_lang_ast::Info;
use bough_lang_printer::{ColorChoice, PrintCfg, PrintExt, PrintToString, WriteColor};

use crate::session;

/// Terminal width for pretty-printing error messages.
const TERMINAL_WIDTH: usize = 200;

struct WriteAdapter<'a, O: std::io::Write>(pub &'a mut O);

impl<O: std::io::Write> fmt::Write for WriteAdapter<'_, O> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// The diagnostics of failed definitions.
pub fn error_reports(reports: &[session::Report]) -> Vec<Report> {
    reports
        .iter()
        .filter_map(|report| report.result.as_ref().err())
        .map(|err| Report::new(err.clone()))
        .collect()
}

pub fn render_reports_to_string(reports: &[Report], colorize: ColorChoice) -> String {
    let mut output = String::new();
    // Writing to a string does not fail.
    let _ = render_reports(&mut output, reports, colorize);
    output
}

pub fn render_reports_io<O>(output: &mut O, reports: &[Report], colorize: ColorChoice) -> fmt::Result
where
    O: std::io::Write,
{
    let mut adapter = WriteAdapter(output);
    render_reports(&mut adapter, reports, colorize)
}

pub fn render_reports<O>(output: &mut O, reports: &[Report], colorize: ColorChoice) -> fmt::Result
where
    O: fmt::Write,
{
    let theme = match colorize {
        ColorChoice::Always | ColorChoice::AlwaysAnsi => miette::GraphicalTheme::unicode(),
        ColorChoice::Auto => miette::GraphicalTheme::default(),
        ColorChoice::Never => miette::GraphicalTheme::unicode_nocolor(),
    };
    let handler = miette::GraphicalReportHandler::new_themed(theme).with_width(TERMINAL_WIDTH);

    let mut reports = reports.iter().peekable();
    while let Some(report) = reports.next() {
        handler.render_report(output, report.as_ref())?;
        if reports.peek().is_some() {
            writeln!(output)?;
        }
    }
    Ok(())
}

/// Print the diagnostic log of a definition, one entry per paragraph.
pub fn render_info(info: &[Info], cfg: &PrintCfg) -> String {
    info.iter().map(|entry| entry.print_to_string(Some(cfg))).collect::<Vec<_>>().join("\n\n")
}

/// Print the diagnostic log of a definition with syntax highlighting.
pub fn render_info_colored<W: WriteColor>(out: &mut W, info: &[Info], cfg: &PrintCfg) -> io::Result<()> {
    for entry in info {
        entry.print_colored(cfg, out)?;
        writeln!(out)?;
    }
    Ok(())
}
