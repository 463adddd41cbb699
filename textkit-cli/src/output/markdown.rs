//! Markdown output formatter

use super::{display_value, OutputFormatter, Record};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - one section per source file, records as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    current_source: Option<String>,
    record_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_source: None,
            record_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_record(&mut self, record: &Record) -> Result<()> {
        if self.current_source.as_deref() != Some(record.source.as_str()) {
            if self.current_source.is_some() {
                writeln!(self.writer)?;
            }
            writeln!(self.writer, "## {}", record.source)?;
            writeln!(self.writer)?;
            self.current_source = Some(record.source.clone());
        }

        self.record_count += 1;
        let text = record.text.split_whitespace().collect::<Vec<_>>().join(" ");
        write!(self.writer, "{}. {}", self.record_count, text)?;
        if let Some(location) = &record.location {
            write!(self.writer, " *({location})*")?;
        }
        for (key, value) in &record.fields {
            write!(self.writer, " `{key}: {}`", display_value(value))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total records: {}*", self.record_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_per_source() {
        let mut buffer = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut buffer);
            formatter
                .format_record(&Record::new("a.txt", "one").at("page 1"))
                .unwrap();
            formatter.format_record(&Record::new("b.txt", "two")).unwrap();
            formatter.finish().unwrap();
        }
        let out = String::from_utf8(buffer).unwrap();
        assert_eq!(
            out,
            "## a.txt\n\n1. one *(page 1)*\n\n## b.txt\n\n2. two\n\n---\n*Total records: 2*\n"
        );
    }
}
