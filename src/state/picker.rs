//! Searchable dropdown state

/// A selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption<V> {
    pub value: V,
    pub label: String,
}

impl<V> PickerOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Dropdown with a type-to-filter search line
#[derive(Debug, Clone)]
pub struct Picker<V> {
    options: Vec<PickerOption<V>>,
    /// Current filter text
    pub query: String,
    /// Whether the dropdown list is shown
    pub is_open: bool,
    /// Index into the filtered options
    pub highlighted: usize,
    placeholder: &'static str,
}

impl<V: Clone + PartialEq> Picker<V> {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            options: Vec::new(),
            query: String::new(),
            is_open: false,
            highlighted: 0,
            placeholder,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Replace the option list, keeping the highlight in range
    pub fn set_options(&mut self, options: Vec<PickerOption<V>>) {
        self.options = options;
        self.clamp_highlight();
    }

    pub fn options(&self) -> &[PickerOption<V>] {
        &self.options
    }

    /// Options matching the query (case-insensitive substring on the label)
    pub fn filtered(&self) -> Vec<&PickerOption<V>> {
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.query.clear();
        self.highlighted = 0;
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.highlighted = 0;
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.highlighted = 0;
    }

    pub fn highlight_next(&mut self) {
        let count = self.filtered().len();
        if count > 0 && self.highlighted < count - 1 {
            self.highlighted += 1;
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn highlighted_option(&self) -> Option<&PickerOption<V>> {
        self.filtered().get(self.highlighted).copied()
    }

    /// Take the highlighted value and close the dropdown
    pub fn choose(&mut self) -> Option<V> {
        let value = self.highlighted_option().map(|o| o.value.clone());
        if value.is_some() {
            self.close();
        }
        value
    }

    fn clamp_highlight(&mut self) {
        let count = self.filtered().len();
        if self.highlighted >= count {
            self.highlighted = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_picker() -> Picker<u32> {
        let mut picker = Picker::new("Select a fruit...");
        picker.set_options(vec![
            PickerOption::new(1, "Apple"),
            PickerOption::new(2, "Banana"),
            PickerOption::new(3, "Pineapple"),
        ]);
        picker
    }

    #[test]
    fn test_new_picker_is_closed_and_empty() {
        let picker: Picker<u32> = Picker::new("Select...");
        assert!(!picker.is_open);
        assert!(picker.options().is_empty());
        assert!(picker.highlighted_option().is_none());
        assert_eq!(picker.placeholder(), "Select...");
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut picker = fruit_picker();
        picker.open();
        for c in "APPLE".chars() {
            picker.push_char(c);
        }
        let labels: Vec<_> = picker.filtered().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "Pineapple"]);
    }

    #[test]
    fn test_backspace_widens_filter() {
        let mut picker = fruit_picker();
        picker.open();
        picker.push_char('b');
        assert_eq!(picker.filtered().len(), 1);
        picker.backspace();
        assert_eq!(picker.filtered().len(), 3);
    }

    #[test]
    fn test_highlight_is_clamped() {
        let mut picker = fruit_picker();
        picker.open();
        picker.highlight_prev();
        assert_eq!(picker.highlighted, 0);
        for _ in 0..10 {
            picker.highlight_next();
        }
        assert_eq!(picker.highlighted, 2);
    }

    #[test]
    fn test_typing_resets_highlight() {
        let mut picker = fruit_picker();
        picker.open();
        picker.highlight_next();
        picker.highlight_next();
        picker.push_char('a');
        assert_eq!(picker.highlighted, 0);
    }

    #[test]
    fn test_choose_returns_highlighted_and_closes() {
        let mut picker = fruit_picker();
        picker.open();
        picker.push_char('n');
        picker.highlight_next();
        assert_eq!(picker.choose(), Some(3));
        assert!(!picker.is_open);
        assert!(picker.query.is_empty());
    }

    #[test]
    fn test_choose_with_no_match_stays_open() {
        let mut picker = fruit_picker();
        picker.open();
        picker.push_char('z');
        assert_eq!(picker.choose(), None);
        assert!(picker.is_open);
    }

    #[test]
    fn test_set_options_clamps_highlight() {
        let mut picker = fruit_picker();
        picker.open();
        picker.highlight_next();
        picker.highlight_next();
        picker.set_options(vec![PickerOption::new(9, "Cherry")]);
        assert_eq!(picker.highlighted, 0);
        assert_eq!(picker.options().len(), 1);
    }
}
