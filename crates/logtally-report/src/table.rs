use unicode_width::UnicodeWidthStr;

use logtally_logs::{LevelCounts, Record};

use crate::config::TableConfig;

/// Renders level counts and record listings as plain text
pub struct TablePresenter {
    config: TableConfig,
}

impl TablePresenter {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Two-column summary: header, rule, then one row per level in stored order
    pub fn render_summary(&self, counts: &LevelCounts) -> String {
        let mut out = String::new();

        self.push_row(&mut out, &self.config.level_header, &self.config.count_header);
        out.push_str(&"-".repeat(self.config.level_width));
        out.push('|');
        out.push_str(&"-".repeat(self.config.count_width));
        out.push('\n');

        for (label, count) in counts.iter() {
            self.push_row(&mut out, label, &count.to_string());
        }

        out
    }

    /// Heading printed above the detail listing
    pub fn render_detail_header(&self, level: &str) -> String {
        format!("\nLog details for level {}:\n", level.to_uppercase())
    }

    /// One `date time level message` line per record
    pub fn render_detail<'a, I>(&self, records: I) -> String
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut out = String::new();
        for record in records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    fn push_row(&self, out: &mut String, label: &str, count: &str) {
        push_cell(out, label, self.config.level_width);
        out.push('|');
        push_cell(out, count, self.config.count_width);
        out.push('\n');
    }
}

impl Default for TablePresenter {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

/// Write a left-aligned cell of `width` display columns with one leading
/// space; longer text overflows the cell
fn push_cell(out: &mut String, text: &str, width: usize) {
    out.push(' ');
    out.push_str(text);
    let used = 1 + text.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
}
