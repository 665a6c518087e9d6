//! Text rendering of a computed graph layout.
//!
//! A thin consumer of the layout output: lane verticals, one dot per commit,
//! refs and the subject line. Curve descriptors are left to richer frontends
//! (and to `--json`).

use colored::Colorize;

use gitscope_graph::{Commit, GraphLayout, UnresolvedReason};

pub struct GraphRenderer {
    color: bool,
}

impl GraphRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render one line per commit, plus a footer for unplotted refs.
    /// `commits` is the feed the layout was computed from, in the same order.
    pub fn render(&self, graph: &GraphLayout, commits: &[Commit]) -> String {
        let columns = graph.column_count();
        let mut out = String::new();

        for (node, commit) in graph.nodes.iter().zip(commits) {
            let mut row = String::new();
            for column in 0..columns {
                if column == node.x {
                    row.push_str(&self.paint("●", &node.color));
                } else if let Some(lane) = graph
                    .lanes
                    .iter()
                    .find(|lane| lane.column == column && lane.is_active_at(node.y))
                {
                    row.push_str(&self.paint("│", &lane.color));
                } else {
                    row.push(' ');
                }
                row.push(' ');
            }

            let short: String = commit.hash.chars().take(8).collect();
            row.push_str(&self.style(&short, |s| s.yellow()));
            if !node.refs.is_empty() {
                row.push(' ');
                let refs = format!("({})", node.refs.join(", "));
                row.push_str(&self.style(&refs, |s| s.bright_green().bold()));
            }
            row.push(' ');
            let date = commit.date.format("%Y-%m-%d").to_string();
            row.push_str(&self.style(&date, |s| s.dimmed()));
            row.push(' ');
            row.push_str(&commit.message);

            out.push_str(row.trim_end());
            out.push('\n');
        }

        for unresolved in &graph.unresolved_refs {
            let why = match &unresolved.reason {
                UnresolvedReason::NotLoaded => "not loaded".to_string(),
                UnresolvedReason::Ambiguous { candidates } => {
                    format!("ambiguous, {} candidates", candidates.len())
                }
            };
            let line = format!("⚠ {} -> {} ({})", unresolved.name, unresolved.target, why);
            out.push_str(&self.style(&line, |s| s.bright_yellow()));
            out.push('\n');
        }

        out
    }

    fn paint(&self, glyph: &str, hex: &str) -> String {
        if !self.color {
            return glyph.to_string();
        }
        match hex_to_rgb(hex) {
            Some((r, g, b)) => glyph.truecolor(r, g, b).to_string(),
            None => glyph.to_string(),
        }
    }

    fn style(
        &self,
        text: &str,
        apply: impl Fn(&str) -> colored::ColoredString,
    ) -> String {
        if !self.color {
            return text.to_string();
        }
        apply(text).to_string()
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
