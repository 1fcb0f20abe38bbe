/// Join lines with a single `\n` and no trailing separator.
///
/// Zero lines produce an empty byte string.
pub fn canonicalize<L: AsRef<[u8]>>(lines: &[L]) -> Vec<u8> {
    let capacity = lines.iter().map(|l| l.as_ref().len() + 1).sum::<usize>();
    let mut out = Vec::with_capacity(capacity);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(line.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_trailing_newline() {
        assert_eq!(canonicalize(&["a", "b", "c"]), b"a\nb\nc");
    }

    #[test]
    fn empty_input_is_empty() {
        let lines: [&str; 0] = [];
        assert!(canonicalize(&lines).is_empty());
    }

    #[test]
    fn single_line_has_no_separator() {
        assert_eq!(canonicalize(&["only"]), b"only");
    }

    #[test]
    fn empty_lines_still_separate() {
        assert_eq!(canonicalize(&["", ""]), b"\n");
    }
}
