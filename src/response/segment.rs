//! Per-message block segmentation of an accumulated FETCH reply.

/// A contiguous run of response lines belonging to one fetched message.
///
/// The first line is normally the `*`-marked untagged line that opened the
/// block; everything up to (but not including) the next marker belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBlock {
    lines: Vec<String>,
}

impl MessageBlock {
    /// Lines of this block, in wire order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with `\n`, for diagnostics.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Splits response lines into per-message blocks.
///
/// A new block starts at every line beginning with the untagged marker `*`.
/// Empty blocks are never emitted, so lines preceding the first marker only
/// form a block if there are any; no other line is ever dropped, and block
/// order matches appearance order.
#[must_use]
pub fn segment(lines: &[String]) -> Vec<MessageBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if line.starts_with('*') && !current.is_empty() {
            blocks.push(MessageBlock {
                lines: std::mem::take(&mut current),
            });
        }
        current.push(line.clone());
    }

    if !current.is_empty() {
        blocks.push(MessageBlock { lines: current });
    }

    blocks
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_two_blocks() {
        let input = lines(&["* A", "h1", "* B", "h2", "h3"]);
        let blocks = segment(&input);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines(), ["* A", "h1"]);
        assert_eq!(blocks[1].lines(), ["* B", "h2", "h3"]);
    }

    #[test]
    fn test_no_marker_yields_single_block() {
        let input = lines(&["h1", "h2"]);
        let blocks = segment(&input);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines(), ["h1", "h2"]);
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_leading_marker_starts_first_block() {
        let input = lines(&["* A", "* B"]);
        let blocks = segment(&input);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines(), ["* A"]);
        assert_eq!(blocks[1].lines(), ["* B"]);
    }

    #[test]
    fn test_round_trip_preserves_all_lines() {
        let input = lines(&["pre", "* A", "h1", "", "* B", ")", "A5 OK"]);
        let blocks = segment(&input);

        let rejoined: Vec<String> = blocks
            .iter()
            .flat_map(|b| b.lines().iter().cloned())
            .collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn test_joined_uses_newlines() {
        let input = lines(&["* A", "h1"]);
        let blocks = segment(&input);
        assert_eq!(blocks[0].joined(), "* A\nh1");
    }
}
