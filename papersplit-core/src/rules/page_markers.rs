use super::patterns::PatternSet;

/// Pull a boundary back onto a `### Page N` marker sitting just above it.
///
/// Looks at most `lookback_lines` lines above the line that contains
/// `boundary`, nearest first. The first marker found wins; otherwise the
/// boundary is returned unchanged.
pub fn absorb_page_marker(document: &str, boundary: usize, patterns: &PatternSet) -> usize {
    let before = &document[..boundary];
    let starts = line_starts(before);

    // The last start is the line holding the boundary itself
    let boundary_line = starts.len() - 1;
    let earliest = boundary_line.saturating_sub(patterns.lookback_lines());

    for index in (earliest..boundary_line).rev() {
        let start = starts[index];
        let end = starts[index + 1] - 1; // drop the '\n'
        if patterns.is_page_marker(&before[start..end]) {
            log::debug!(
                "Absorbed page marker '{}' at offset {} (boundary was {})",
                before[start..end].trim_end(),
                start,
                boundary
            );
            return start;
        }
    }

    boundary
}

/// Byte offset of every line start in `text`, beginning with 0
fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}
