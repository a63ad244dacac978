//! Plain-text rendering of a view state

use std::fmt;

use crate::server::ServerRecord;
use crate::view::ViewState;

const HEADERS: [&str; 6] = ["ID", "IP Address", "Name", "Memory", "Type", "Status"];

fn row(server: &ServerRecord) -> [String; 6] {
    [
        server.id.to_string(),
        server.ip_address.clone(),
        server.name.clone(),
        server.memory.clone(),
        server.server_type.clone(),
        server.status.label().to_string(),
    ]
}

/// A view state rendered as a titled text table
pub struct Report<'a> {
    pub title: &'a str,
    pub view: &'a ViewState,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;

        let data = match self.view {
            ViewState::Loading => return writeln!(f, "Loading..."),
            ViewState::Error { message } => return writeln!(f, "Error: {}", message),
            ViewState::Loaded { data } => data,
        };

        if !data.message_text().is_empty() {
            writeln!(f, "{}", data.message_text())?;
        }
        let rows: Vec<[String; 6]> = data.servers().iter().map(row).collect();
        if rows.is_empty() {
            return writeln!(f, "No servers.");
        }

        let mut widths = HEADERS.map(str::len);
        for r in &rows {
            for (width, cell) in widths.iter_mut().zip(r.iter()) {
                *width = (*width).max(cell.len());
            }
        }

        write_line(f, &HEADERS.map(String::from), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for r in &rows {
            write_line(f, r, &widths)?;
        }
        writeln!(f, "{} server(s)", rows.len())
    }
}

/// Render `view` as a titled text table
pub fn render_report(title: &str, view: &ViewState) -> String {
    Report { title, view }.to_string()
}

fn write_line(
    f: &mut fmt::Formatter<'_>,
    cells: &[String; 6],
    widths: &[usize; 6],
) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}
