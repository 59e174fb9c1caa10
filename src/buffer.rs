/// An append-only output sink with trailing-whitespace trim.
///
/// Two shapes of sink satisfy the contract: `String` concatenates chunks
/// into one backing string, while `Vec<String>` keeps every appended chunk
/// as its own element for callers whose output is a list of objects rather
/// than characters. `Default` supplies the scratch buffer the fits
/// lookahead uses to model trim behavior faithfully.
pub trait Buffer: Default {
    fn append(&mut self, chunk: &str);

    /// Removes the run of trailing tabs and spaces on the current line and
    /// returns how many columns were dropped. Never crosses a newline.
    fn trim_trailing(&mut self) -> usize;

    /// Splices `other` onto the end of this buffer.
    fn extend_from(&mut self, other: Self);
}

impl Buffer for String {
    fn append(&mut self, chunk: &str) {
        self.push_str(chunk);
    }

    fn trim_trailing(&mut self) -> usize {
        let trimmed = self.trim_end_matches([' ', '\t']).len();
        let removed = self.len() - trimmed;
        self.truncate(trimmed);
        removed
    }

    fn extend_from(&mut self, other: Self) {
        self.push_str(&other);
    }
}

impl Buffer for Vec<String> {
    fn append(&mut self, chunk: &str) {
        self.push(chunk.to_owned());
    }

    fn trim_trailing(&mut self) -> usize {
        let mut removed = 0;

        // Drop whole chunks that are nothing but spaces and tabs. A chunk
        // holding a newline never matches, so the line boundary holds.
        while let Some(last) = self.last() {
            if !last.bytes().all(|b| b == b' ' || b == b'\t') {
                break;
            }
            removed += last.len();
            self.pop();
        }

        if let Some(last) = self.last_mut() {
            let trimmed = last.trim_end_matches([' ', '\t']).len();
            removed += last.len() - trimmed;
            last.truncate(trimmed);
        }

        removed
    }

    fn extend_from(&mut self, other: Self) {
        self.extend(other);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn string_trim_strips_spaces_and_tabs() {
        let mut buffer = String::from("value \t ");
        assert_eq!(buffer.trim_trailing(), 3);
        assert_eq!(buffer, "value");
    }

    #[test]
    fn string_trim_stops_at_newline() {
        let mut buffer = String::from("line\n  ");
        assert_eq!(buffer.trim_trailing(), 2);
        assert_eq!(buffer, "line\n");

        // Nothing left to trim on the fresh line.
        assert_eq!(buffer.trim_trailing(), 0);
        assert_eq!(buffer, "line\n");
    }

    #[test]
    fn chunk_trim_pops_whitespace_chunks() {
        let mut buffer: Vec<String> = vec!["value".into(), " ".into(), "\t ".into()];
        assert_eq!(buffer.trim_trailing(), 3);
        assert_eq!(buffer, vec!["value".to_owned()]);
    }

    #[test]
    fn chunk_trim_strips_mixed_last_chunk_in_place() {
        let mut buffer: Vec<String> = vec!["value  ".into(), " ".into()];
        assert_eq!(buffer.trim_trailing(), 3);
        assert_eq!(buffer, vec!["value".to_owned()]);
    }

    #[test]
    fn chunk_trim_stops_at_newline_chunk() {
        let mut buffer: Vec<String> = vec!["line".into(), "\n".into(), "  ".into()];
        assert_eq!(buffer.trim_trailing(), 2);
        assert_eq!(buffer, vec!["line".to_owned(), "\n".to_owned()]);
    }

    #[test]
    fn extend_from_splices_buffers() {
        let mut string = String::from("ab");
        string.extend_from(String::from("cd"));
        assert_eq!(string, "abcd");

        let mut chunks: Vec<String> = vec!["ab".into()];
        chunks.extend_from(vec!["cd".into()]);
        assert_eq!(chunks, vec!["ab".to_owned(), "cd".to_owned()]);
    }
}
