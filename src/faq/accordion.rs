/// One question and its answer panel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FaqItem {
    /// Question id.
    pub id: String,
    /// Mirrors the question button's `aria-expanded`.
    pub expanded: bool,
    /// `None` when the item has no answer element.
    pub answer_hidden: Option<bool>,
}

impl FaqItem {
    /// A collapsed item.
    pub fn new(id: impl Into<String>, has_answer: bool) -> Self {
        Self {
            id: id.into(),
            expanded: false,
            answer_hidden: has_answer.then_some(true),
        }
    }
}

/// The FAQ list.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Accordion {
    items: Vec<FaqItem>,
}

impl Accordion {
    /// An accordion over items in document order.
    pub fn new(items: Vec<FaqItem>) -> Self {
        Self { items }
    }

    /// Every item.
    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&FaqItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flip one item. Others are left as they are.
    pub fn toggle(&mut self, id: &str) -> Option<&FaqItem> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        let was_expanded = item.expanded;
        item.expanded = !was_expanded;
        if let Some(hidden) = item.answer_hidden.as_mut() {
            *hidden = was_expanded;
        }
        Some(item)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/faq/accordion.rs"]
mod tests;
