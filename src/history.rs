use std::io::{self, Write};

/// Append-only log of the raw lines entered in this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    // Blank lines are not recorded; everything else is kept as typed.
    pub fn record(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.entries.push(line.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 1-indexed, like the listing.
    pub fn get(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for (i, line) in self.entries.iter().enumerate() {
            writeln!(out, "{}  {}", i + 1, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_skips_blank_lines() {
        let mut history = History::new();
        history.record("echo hi");
        history.record("");
        history.record("  \t");
        history.record("  pwd ");
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries(), ["echo hi", "  pwd "]);
    }

    #[test]
    fn test_get_is_one_indexed() {
        let mut history = History::new();
        history.record("first");
        history.record("second");
        assert_eq!(history.get(0), None);
        assert_eq!(history.get(1), Some("first"));
        assert_eq!(history.get(2), Some("second"));
        assert_eq!(history.get(3), None);
    }

    #[test]
    fn test_write_to_lists_in_order() {
        let mut history = History::new();
        history.record("echo hi");
        history.record("pwd");
        let mut out = Vec::new();
        history.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1  echo hi\n2  pwd\n");

        let mut again = Vec::new();
        history.write_to(&mut again).unwrap();
        assert_eq!(again, b"1  echo hi\n2  pwd\n");
        assert_eq!(history.len(), 2);
    }
}
