/// Independent expand/collapse state per question.
pub mod accordion;
