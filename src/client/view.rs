//! The product list as rendered markup plus per-item edit state.
//!
//! Each item keeps the record it was fetched with, so an edit form is filled
//! from data rather than from whatever text happens to be on screen.

use std::fmt::{self, Write};

use super::form::ProductForm;
use crate::models::Product;

pub const EMPTY_MESSAGE: &str = "No products yet.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Is the backend server running?";

#[derive(Debug, Clone, PartialEq)]
pub enum ItemState {
    Display,
    Editing(ProductForm),
    /// A request for this item is in flight.
    Pending(PendingAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Save,
    Delete,
}

impl PendingAction {
    fn label(self) -> &'static str {
        match self {
            PendingAction::Save => "Saving…",
            PendingAction::Delete => "Deleting…",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub product: Product,
    pub state: ItemState,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    items: Vec<ListItem>,
    load_failed: bool,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list. Any open edit forms are dropped.
    pub fn show(&mut self, products: Vec<Product>) {
        self.load_failed = false;
        self.items = products
            .into_iter()
            .map(|product| ListItem { product, state: ItemState::Display })
            .collect();
    }

    pub fn show_load_failure(&mut self) {
        self.load_failed = true;
        self.items.clear();
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn item(&self, id: i64) -> Option<&ListItem> {
        self.items.iter().find(|item| item.product.id == id)
    }

    fn item_mut(&mut self, id: i64) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|item| item.product.id == id)
    }

    /// display → editing. Returns false if the item is missing or not on display.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.item_mut(id) {
            Some(item) if item.state == ItemState::Display => {
                item.state = ItemState::Editing(ProductForm::from_product(&item.product));
                true
            }
            _ => false,
        }
    }

    pub fn draft_mut(&mut self, id: i64) -> Option<&mut ProductForm> {
        match self.item_mut(id) {
            Some(ListItem { state: ItemState::Editing(draft), .. }) => Some(draft),
            _ => None,
        }
    }

    /// Moves the item to pending and hands back the state it left.
    pub fn mark_pending(&mut self, id: i64, action: PendingAction) -> Option<ItemState> {
        let item = self.item_mut(id)?;
        if matches!(item.state, ItemState::Pending(_)) {
            return None;
        }
        Some(std::mem::replace(&mut item.state, ItemState::Pending(action)))
    }

    /// Puts back a state taken by [`CatalogView::mark_pending`] after a failed request.
    pub fn restore(&mut self, id: i64, state: ItemState) {
        if let Some(item) = self.item_mut(id) {
            item.state = state;
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.load_failed {
            return write!(f, "<li>{}</li>", LOAD_FAILED_MESSAGE);
        }
        if self.items.is_empty() {
            return write!(f, "<li>{}</li>", EMPTY_MESSAGE);
        }
        for item in &self.items {
            render_item(f, item)?;
        }
        Ok(())
    }
}

fn render_item(out: &mut impl Write, item: &ListItem) -> fmt::Result {
    let product = &item.product;
    let id = product.id;
    writeln!(out, "<li data-id=\"{id}\">")?;
    match &item.state {
        ItemState::Display | ItemState::Pending(_) => {
            let pending = match item.state {
                ItemState::Pending(action) => Some(action),
                _ => None,
            };
            let disabled = if pending.is_some() { " disabled" } else { "" };
            writeln!(out, "  <h3>{}</h3>", escape(&product.name))?;
            writeln!(
                out,
                "  <p><strong>Description:</strong> {}</p>",
                escape(product.description_en.as_deref().unwrap_or(""))
            )?;
            writeln!(out, "  <p><strong>Price:</strong> ${:.2}</p>", product.price)?;
            writeln!(out, "  <button class=\"edit-btn\" data-id=\"{id}\"{disabled}>Edit</button>")?;
            writeln!(out, "  <button class=\"delete-btn\" data-id=\"{id}\"{disabled}>Delete</button>")?;
            if let Some(action) = pending {
                writeln!(out, "  <span class=\"pending\">{}</span>", action.label())?;
            }
        }
        ItemState::Editing(draft) => {
            let inputs = [
                ("text", "edit-name", &draft.name),
                ("text", "edit-desc-en", &draft.description_en),
                ("text", "edit-desc-zh", &draft.description_zh),
                ("text", "edit-desc-ar", &draft.description_ar),
                ("number", "edit-price", &draft.price),
                ("text", "edit-image", &draft.image_url),
            ];
            for (kind, class, value) in inputs {
                let step = if kind == "number" { " step=\"0.01\"" } else { "" };
                writeln!(
                    out,
                    "  <input type=\"{kind}\"{step} class=\"{class}\" value=\"{}\">",
                    escape(value)
                )?;
            }
            writeln!(out, "  <button class=\"save-btn\" data-id=\"{id}\">Save</button>")?;
            writeln!(out, "  <button class=\"cancel-btn\" data-id=\"{id}\">Cancel</button>")?;
        }
    }
    out.write_str("</li>\n")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.into(),
            description_en: Some("Ceramic".into()),
            description_zh: Some("陶瓷".into()),
            description_ar: None,
            price: 9.99,
            image_url: None,
        }
    }

    #[test]
    fn renders_placeholders() {
        let mut view = CatalogView::new();
        assert_eq!(view.render(), format!("<li>{EMPTY_MESSAGE}</li>"));
        view.show_load_failure();
        assert_eq!(view.render(), format!("<li>{LOAD_FAILED_MESSAGE}</li>"));
    }

    #[test]
    fn display_markup_escapes_text() {
        let mut view = CatalogView::new();
        view.show(vec![product(1, "<b>Mug</b> & Co")]);
        let html = view.render();
        assert!(html.contains("<h3>&lt;b&gt;Mug&lt;/b&gt; &amp; Co</h3>"));
        assert!(html.contains("<p><strong>Price:</strong> $9.99</p>"));
        assert!(html.contains("class=\"edit-btn\" data-id=\"1\""));
    }

    #[test]
    fn edit_draft_comes_from_the_record() {
        let mut view = CatalogView::new();
        view.show(vec![product(1, "Mug")]);
        assert!(view.begin_edit(1));
        assert!(!view.begin_edit(1));

        let draft = view.draft_mut(1).unwrap();
        assert_eq!(draft.description_zh, "陶瓷");
        assert_eq!(draft.price, "9.99");

        let html = view.render();
        assert!(html.contains("class=\"edit-name\" value=\"Mug\""));
        assert!(html.contains("class=\"save-btn\""));
        assert!(!html.contains("edit-btn"));
    }

    #[test]
    fn pending_round_trip_restores_draft() {
        let mut view = CatalogView::new();
        view.show(vec![product(1, "Mug"), product(2, "Cup")]);
        view.begin_edit(1);
        view.draft_mut(1).unwrap().name = "Big mug".into();

        let previous = view.mark_pending(1, PendingAction::Save).unwrap();
        assert_eq!(view.item(1).unwrap().state, ItemState::Pending(PendingAction::Save));
        assert!(view.mark_pending(1, PendingAction::Delete).is_none());
        let html = view.render();
        assert!(html.contains("disabled"));
        assert!(html.contains("Saving…"));

        view.restore(1, previous);
        assert_eq!(view.draft_mut(1).unwrap().name, "Big mug");
        assert_eq!(view.item(2).unwrap().state, ItemState::Display);
    }

    #[test]
    fn pending_delete_is_labelled_as_delete() {
        let mut view = CatalogView::new();
        view.show(vec![product(1, "Mug")]);
        assert_eq!(
            view.mark_pending(1, PendingAction::Delete),
            Some(ItemState::Display)
        );

        let html = view.render();
        assert!(html.contains("<span class=\"pending\">Deleting…</span>"));
        assert!(!html.contains("Saving…"));
    }

    #[test]
    fn show_discards_open_forms() {
        let mut view = CatalogView::new();
        view.show(vec![product(1, "Mug")]);
        view.begin_edit(1);
        view.show(vec![product(1, "Mug")]);
        assert_eq!(view.item(1).unwrap().state, ItemState::Display);
        assert!(view.draft_mut(1).is_none());
    }
}
