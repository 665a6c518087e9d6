use serde::{Deserialize, Serialize};

/// Default lane colors, cycled in lane allocation order.
const DEFAULT_COLORS: [&str; 12] = [
    "#007acc", // blue
    "#ff6b35", // orange
    "#4caf50", // green
    "#e91e63", // pink
    "#9c27b0", // violet
    "#00bcd4", // teal
    "#f44336", // red
    "#8bc34a", // lime
    "#673ab7", // grape
    "#03a9f4", // cyan
    "#3f51b5", // indigo
    "#ffeb3b", // yellow
];

/// The set of colors lanes cycle through as they are opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    /// Build a palette from custom colors. An empty list falls back to the
    /// default palette so cycling is always well defined.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Color for the nth lane ever opened.
    pub fn color(&self, cycle: usize) -> &str {
        &self.colors[cycle % self.colors.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}
