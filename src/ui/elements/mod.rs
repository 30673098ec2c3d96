// src/ui/elements/mod.rs
pub mod assistant_panel;
pub mod documents_panel;
pub mod field_popover;
pub mod form_table;
pub mod issue_card;
pub mod workspace;
