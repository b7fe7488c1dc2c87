use log::debug;

use slac_core::alphabet::{CODING_MATCH_GLYPH, NON_CODING_MATCH_GLYPH, ellipsis_for_glyph};
use slac_core::{RenderMode, SlacString};

/// Share of a block the most common glyph must reach to stand for the block unmarked.
pub const DEFAULT_FREQUENCY_THRESHOLD: f64 = 1.0;

///
/// Fixed-width thumbnail of a SLAC: the glyph rendering cut into equal blocks, one
/// character per block.
///
/// A block becomes its most common glyph when that glyph covers at least `threshold` of
/// the block, or when the block holds only matches or only hit deletions. Otherwise it
/// becomes the ellipsis counterpart of its most common glyph. Unlike [`crate::abbreviate`]
/// this gives no guarantee that every notable column survives.
///
/// # Arguments
///
/// - slac: the full SLAC
/// - size: the number of output characters wanted
/// - threshold: frequency at which the most common glyph is kept as is
///
pub fn summarize(slac: &SlacString, size: usize, threshold: f64) -> String {
    let glyphs: Vec<char> = slac.render(RenderMode::Glyphs).chars().collect();
    let mut block_size = glyphs.len().checked_div(size).unwrap_or(0);
    if block_size < 1 || glyphs.len() <= size {
        return glyphs.into_iter().collect();
    }

    let mut summary = String::with_capacity(size);
    let mut blocks = 0;
    let mut i = 0;

    while i < glyphs.len() {
        if blocks + 1 == size {
            // last block takes whatever is left
            block_size = glyphs.len() - i;
        } else if i + block_size >= glyphs.len() && blocks + 1 < size {
            block_size = (block_size - 1).max(1);
        }

        let end = (i + block_size).min(glyphs.len());
        summary.push(summarize_block(&glyphs[i..end], threshold));
        blocks += 1;
        i += block_size;
    }

    debug!(
        "summarized {} columns into {} blocks",
        glyphs.len(),
        summary.chars().count()
    );
    summary
}

fn summarize_block(block: &[char], threshold: f64) -> char {
    if block.len() == 1 {
        return block[0];
    }

    let (common, count) = most_common(block);
    let is_match = |c: &char| *c == CODING_MATCH_GLYPH || *c == NON_CODING_MATCH_GLYPH;
    let is_deletion = |c: &char| *c == '=' || *c == '_';

    if count as f64 >= block.len() as f64 * threshold
        || block.iter().all(is_match)
        || block.iter().all(is_deletion)
    {
        common
    } else {
        ellipsis_for_glyph(common)
    }
}

/// Most frequent glyph, ties going to the one seen first.
fn most_common(block: &[char]) -> (char, usize) {
    let mut counts: Vec<(char, usize)> = Vec::new();
    for &c in block {
        match counts.iter_mut().find(|(seen, _)| *seen == c) {
            Some((_, n)) => *n += 1,
            None => counts.push((c, 1)),
        }
    }
    counts
        .into_iter()
        .fold((block[0], 0), |best, (c, n)| if n > best.1 { (c, n) } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn slac(text: &str) -> SlacString {
        SlacString::from_text(text, &[]).unwrap()
    }

    #[test]
    fn test_short_input_is_returned_as_glyphs() {
        assert_eq!(summarize(&slac("ACgX^"), 10, 1.0), "||OX^");
    }

    #[rstest]
    #[case(1.0, "!|")]
    #[case(0.8, "||")]
    fn test_threshold(#[case] threshold: f64, #[case] expected: &str) {
        // a 10 column block with one mismatch, then 10 clean columns
        let text = format!("AAAXAAAAAA{}", "A".repeat(10));
        assert_eq!(summarize(&slac(&text), 2, threshold), expected);
    }

    #[test]
    fn test_match_only_and_deletion_only_blocks() {
        let text = format!("{}{}{}{}", "AAAA", "AAaa", "==__", "^^^A");
        assert_eq!(summarize(&slac(&text), 4, 1.0), "||=`");
    }

    #[test]
    fn test_output_fits_size() {
        let text = "A".repeat(103);
        for size in [7, 10, 50] {
            assert!(summarize(&slac(&text), size, 1.0).chars().count() <= size);
        }
        assert_eq!(summarize(&slac(&text), 10, 1.0).chars().count(), 10);
    }
}
