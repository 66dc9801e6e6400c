//! Post-generation look at the shape of a transformed text. The model is only
//! asked to open with five single-word lines; nothing here rejects output.

pub const EXPECTED_LEADING_WORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleReport {
    pub leading_words: Vec<String>,
}

impl StyleReport {
    pub fn inspect(text: &str) -> Self {
        let leading_words = text
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .map_while(single_word_line)
            .map(str::to_string)
            .collect();

        Self { leading_words }
    }

    pub fn conforms(&self) -> bool {
        self.leading_words.len() == EXPECTED_LEADING_WORDS
    }
}

/// `Sorrow.` qualifies, `Sorrow`, `Deep sorrow.` and `.` do not.
fn single_word_line(line: &str) -> Option<&str> {
    let line = line.trim();
    let word = line.strip_suffix('.')?;

    let is_word = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_alphabetic() || c == '\'' || c == '-');

    is_word.then_some(line)
}
