//! Plain text output formatter

use super::{display_value, OutputFormatter, Record};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one tab-separated record per line.
///
/// Line breaks inside a record are flattened to spaces so each record
/// stays on one line.
pub struct TextFormatter<W: Write> {
    writer: W,
    show_source: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_source: false,
        }
    }

    /// Prefix each line with its source file
    pub fn with_source(mut self, show_source: bool) -> Self {
        self.show_source = show_source;
        self
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_record(&mut self, record: &Record) -> Result<()> {
        let mut columns = Vec::with_capacity(3 + record.fields.len());
        if self.show_source {
            columns.push(record.source.clone());
        }
        if let Some(location) = &record.location {
            columns.push(location.clone());
        }
        columns.push(one_line(&record.text));
        for (key, value) in &record.fields {
            columns.push(format!("{key}={}", display_value(value)));
        }
        writeln!(self.writer, "{}", columns.join("\t"))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(show_source: bool, records: &[Record]) -> String {
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer).with_source(show_source);
            for record in records {
                formatter.format_record(record).unwrap();
            }
            formatter.finish().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_plain_lines() {
        let out = render(false, &[Record::new("a.txt", " the\ndoctor "), Record::new("a.txt", "on")]);
        assert_eq!(out, "the doctor\non\n");
    }

    #[test]
    fn test_columns() {
        let record = Record::new("a.txt", "excerpt").at("page 1").field("date", "2011-09-30");
        assert_eq!(render(true, &[record]), "a.txt\tpage 1\texcerpt\tdate=2011-09-30\n");
    }
}
