use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Color of the EU aggregate line.
pub const EU_COLOR: &str = "#003399";

/// Distinct hues handed out in discovery order. Wide enough that the 27
/// tracked countries never share a color.
pub const PALETTE: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#42d4f4",
    "#f032e6", "#bfef45", "#fabed4", "#469990", "#dcbeff", "#9a6324", "#fffac8",
    "#800000", "#aaffc3", "#808000", "#ffd8b1", "#000075", "#a9a9a9", "#1f77b4",
    "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Per-country line colors.
///
/// A code gets its color the first time it is assigned and keeps it for the
/// palette's lifetime, including across re-fetches. Past the end of
/// `PALETTE` colors repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    assigned: HashMap<String, String>,
    next_index: usize,
}

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `code`, assigning the next palette entry if it has none yet.
    pub fn assign(&mut self, code: &str) -> &str {
        if !self.assigned.contains_key(code) {
            let color = PALETTE[self.next_index % PALETTE.len()].to_string();
            self.next_index += 1;
            self.assigned.insert(code.to_string(), color);
        }
        self.assigned.get(code).map_or(PALETTE[0], String::as_str)
    }

    /// Assign colors to every code, in the given order.
    pub fn assign_all<'a, I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for code in codes {
            self.assign(code);
        }
    }

    /// Color previously assigned to `code`.
    pub fn color_of(&self, code: &str) -> Option<&str> {
        self.assigned.get(code).map(String::as_str)
    }

    /// Number of codes that have a color.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
