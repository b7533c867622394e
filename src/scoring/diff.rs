use std::collections::HashMap;

use serde::Serialize;

use super::normalize::normalize;

/// Edit operation kind in an opcode alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One alignment operation mapping a range of the standard text (`a`) onto a
/// range of the predicted text (`b`). Ranges are char indices, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: DiffTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

/// Visual classification of a predicted-text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanTag {
    Match,
    Mismatch,
}

/// A tagged substring of the predicted text. Concatenating span texts in
/// order reconstructs the predicted string exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentSpan {
    pub tag: SpanTag,
    pub text: String,
}

/// Which form of the texts the alignment runs on.
///
/// `Raw` diffs the strings as given, so punctuation and spacing differences
/// show up as mismatches even though scoring ignores them. `Normalized` diffs
/// the normalized forms, making the highlighting agree with the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentMode {
    #[default]
    Raw,
    Normalized,
}

#[derive(Debug, Clone, Copy)]
struct MatchingBlock {
    a: usize,
    b: usize,
    len: usize,
}

/// Tag each region of the predicted text as match or mismatch against the
/// standard text. Delete operations consume no predicted text and are
/// omitted, so the spans partition the predicted string.
pub fn alignment_spans(standard: &str, predicted: &str, mode: AlignmentMode) -> Vec<AlignmentSpan> {
    let (standard, predicted) = match mode {
        AlignmentMode::Raw => (standard.to_owned(), predicted.to_owned()),
        AlignmentMode::Normalized => (normalize(standard), normalize(predicted)),
    };
    let a: Vec<char> = standard.chars().collect();
    let b: Vec<char> = predicted.chars().collect();

    let mut spans = Vec::new();
    for op in opcodes(&a, &b) {
        if op.b_start == op.b_end {
            continue;
        }
        let tag = if op.tag == DiffTag::Equal {
            SpanTag::Match
        } else {
            SpanTag::Mismatch
        };
        spans.push(AlignmentSpan {
            tag,
            text: b[op.b_start..op.b_end].iter().collect(),
        });
    }
    spans
}

/// Full opcode alignment between two char sequences, in order, covering both
/// sequences exactly once.
pub fn opcodes(a: &[char], b: &[char]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let (mut ai, mut bj) = (0, 0);
    for block in matching_blocks(a, b) {
        let gap_tag = match (ai < block.a, bj < block.b) {
            (true, true) => Some(DiffTag::Replace),
            (true, false) => Some(DiffTag::Delete),
            (false, true) => Some(DiffTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = gap_tag {
            ops.push(Opcode {
                tag,
                a_start: ai,
                a_end: block.a,
                b_start: bj,
                b_end: block.b,
            });
        }
        if block.len > 0 {
            ops.push(Opcode {
                tag: DiffTag::Equal,
                a_start: block.a,
                a_end: block.a + block.len,
                b_start: block.b,
                b_end: block.b + block.len,
            });
        }
        ai = block.a + block.len;
        bj = block.b + block.len;
    }
    ops
}

/// Longest-matching-block decomposition: recursively find the longest common
/// block, then match the regions before and after it. Returned blocks are
/// sorted, adjacent blocks merged, with a zero-length terminator at the end.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let b_index = index_positions(b);
    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    let mut found = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let block = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if block.len == 0 {
            continue;
        }
        if alo < block.a && blo < block.b {
            queue.push((alo, block.a, blo, block.b));
        }
        if block.a + block.len < ahi && block.b + block.len < bhi {
            queue.push((block.a + block.len, ahi, block.b + block.len, bhi));
        }
        found.push(block);
    }
    found.sort_by_key(|block| (block.a, block.b));

    let mut merged: Vec<MatchingBlock> = Vec::new();
    for block in found {
        match merged.last_mut() {
            Some(last) if last.a + last.len == block.a && last.b + last.len == block.b => {
                last.len += block.len;
            }
            _ => merged.push(block),
        }
    }
    merged.push(MatchingBlock {
        a: a.len(),
        b: b.len(),
        len: 0,
    });
    merged
}

fn index_positions(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        index.entry(c).or_default().push(j);
    }
    index
}

/// Longest block of chars common to `a[alo..ahi]` and `b[blo..bhi]`. Ties go
/// to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        a: alo,
        b: blo,
        len: 0,
    };
    // run_lengths[j] = length of the common run ending at (i, j).
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_runs = HashMap::new();
        if let Some(positions) = b_index.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = match j.checked_sub(1) {
                    Some(prev) => run_lengths.get(&prev).copied().unwrap_or(0) + 1,
                    None => 1,
                };
                next_runs.insert(j, run);
                if run > best.len {
                    best = MatchingBlock {
                        a: i + 1 - run,
                        b: j + 1 - run,
                        len: run,
                    };
                }
            }
        }
        run_lengths = next_runs;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{alignment_spans, opcodes, AlignmentMode, AlignmentSpan, DiffTag, SpanTag};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn tags(a: &str, b: &str) -> Vec<DiffTag> {
        opcodes(&chars(a), &chars(b))
            .iter()
            .map(|op| op.tag)
            .collect()
    }

    #[test]
    fn identical_inputs_yield_single_equal_opcode() {
        assert_eq!(tags("가나다", "가나다"), vec![DiffTag::Equal]);
    }

    #[test]
    fn substitution_splits_into_equal_and_replace() {
        assert_eq!(tags("가나다", "가나라"), vec![DiffTag::Equal, DiffTag::Replace]);
    }

    #[test]
    fn opcodes_cover_both_sequences_contiguously() {
        let a = chars("abcdef");
        let b = chars("azced");
        let ops = opcodes(&a, &b);
        let (mut ai, mut bj) = (0, 0);
        for op in &ops {
            assert_eq!(op.a_start, ai);
            assert_eq!(op.b_start, bj);
            ai = op.a_end;
            bj = op.b_end;
        }
        assert_eq!(ai, a.len());
        assert_eq!(bj, b.len());
    }

    #[test]
    fn empty_inputs_produce_no_opcodes() {
        assert!(opcodes(&[], &[]).is_empty());
        assert_eq!(tags("", "abc"), vec![DiffTag::Insert]);
        assert_eq!(tags("abc", ""), vec![DiffTag::Delete]);
    }

    #[test]
    fn spans_reconstruct_predicted_text() {
        let standard = "나는 집 내부 공사를 끝냈다.";
        let predicted = "나는 집 내부 공사를 끝냈다";
        let spans = alignment_spans(standard, predicted, AlignmentMode::Raw);
        let rebuilt: String = spans.iter().map(|span| span.text.as_str()).collect();
        assert_eq!(rebuilt, predicted);
    }

    #[test]
    fn deletions_do_not_emit_empty_spans() {
        let spans = alignment_spans("abcdef", "abef", AlignmentMode::Raw);
        assert!(spans.iter().all(|span| !span.text.is_empty()));
        assert_eq!(
            spans,
            vec![AlignmentSpan {
                tag: SpanTag::Match,
                text: "ab".to_string(),
            },
            AlignmentSpan {
                tag: SpanTag::Match,
                text: "ef".to_string(),
            }]
        );
    }

    #[test]
    fn raw_mode_flags_punctuation_differences() {
        let spans = alignment_spans("가나다.", "가나다", AlignmentMode::Raw);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].tag, SpanTag::Match);

        let spans = alignment_spans("가나다.", "가나다!", AlignmentMode::Raw);
        assert!(spans.iter().any(|span| span.tag == SpanTag::Mismatch));
    }

    #[test]
    fn normalized_mode_ignores_punctuation_differences() {
        let spans = alignment_spans("가나다.", "가나다!", AlignmentMode::Normalized);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].tag, SpanTag::Match);
        assert_eq!(spans[0].text, "가나다");
    }

    #[test]
    fn mismatched_middle_is_flagged() {
        let spans = alignment_spans("가나다라", "가마다라", AlignmentMode::Raw);
        let rebuilt: String = spans.iter().map(|span| span.text.as_str()).collect();
        assert_eq!(rebuilt, "가마다라");
        assert_eq!(
            spans
                .iter()
                .filter(|span| span.tag == SpanTag::Mismatch)
                .count(),
            1
        );
    }
}
