use unicode_segmentation::UnicodeSegmentation;

pub trait StringEdit {
    fn backspace(&mut self, cursor: usize) -> usize;
    fn pop_grapheme(&mut self) -> bool;
    fn insert_typed(&mut self, typed: &str) -> bool;
}

impl StringEdit for String {
    fn backspace(&mut self, cursor: usize) -> usize {
        let previous_grapheme = self[0..cursor].grapheme_indices(true).rev().next();
        if let Some((prev_idx, _prev_grapheme)) = previous_grapheme {
            self.replace_range(prev_idx..cursor, "");
            return prev_idx;
        }
        return cursor;
    }

    /// Backspace with the cursor at the end. Returns `false` if the string was already empty.
    fn pop_grapheme(&mut self) -> bool {
        let len = self.len();
        return self.backspace(len) != len;
    }

    /// Appends keyboard text, dropping control characters. Returns `true` if anything was added.
    fn insert_typed(&mut self, typed: &str) -> bool {
        let before = self.len();
        self.extend(typed.chars().filter(|c| !c.is_control()));
        return self.len() != before;
    }
}
