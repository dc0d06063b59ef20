/// Longest name the prompt accepts
pub const MAX_NAME_LEN: usize = 24;

/// Text buffer behind the "enter your name" modal.
#[derive(Default)]
pub struct NamePrompt {
    buffer: String,
}

impl NamePrompt {
    pub fn push(&mut self, ch: char) {
        if !ch.is_control() && self.buffer.chars().count() < MAX_NAME_LEN {
            self.buffer.push(ch);
        }
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Take the trimmed name, or `None` (keeping the buffer) if it is blank.
    pub fn submit(&mut self) -> Option<String> {
        let name = self.buffer.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        self.buffer.clear();
        Some(name)
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            "You have completed the tutorial".to_string(),
            "Please enter your name to proceed".to_string(),
            String::new(),
            format!("> {}_", self.buffer),
            String::new(),
            "Enter to confirm, Esc to quit".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> NamePrompt {
        let mut prompt = NamePrompt::default();
        text.chars().for_each(|c| prompt.push(c));
        prompt
    }

    #[test]
    fn blank_submission_is_rejected() {
        let mut prompt = typed("   ");
        assert_eq!(prompt.submit(), None);
        assert_eq!(prompt.text(), "   ");
    }

    #[test]
    fn submission_is_trimmed_and_clears_buffer() {
        let mut prompt = typed("  Ana Lu ");
        assert_eq!(prompt.submit().as_deref(), Some("Ana Lu"));
        assert_eq!(prompt.text(), "");
    }

    #[test]
    fn length_is_capped_and_controls_dropped() {
        let mut prompt = typed(&"x".repeat(40));
        assert_eq!(prompt.text().len(), MAX_NAME_LEN);
        prompt.pop();
        prompt.push('\t');
        assert_eq!(prompt.text().len(), MAX_NAME_LEN - 1);
    }
}
