//! HTML markup for the rendering surface

use crate::state::{EMPTY_PLACEHOLDER, ViewItem, ViewState};
use crate::sync::SyncOptions;

/// Item template with `{id}`, `{text}`, `{checked}` and `{class}` slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    source: String,
}

impl ItemTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Fill the slots for `item` in a single pass; values are HTML-escaped
    /// and never expanded again. Unknown `{...}` sequences are kept as is.
    pub fn fill(&self, item: &ViewItem) -> String {
        let mut out = String::with_capacity(self.source.len() + item.text.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let slot = tail.find('}').map(|end| &tail[1..end]);
            let value = match slot {
                Some("id") => Some(escape_html(&item.id)),
                Some("text") => Some(escape_html(&item.text)),
                Some("checked") => Some(checked_attr(item).to_string()),
                Some("class") => Some(item_class(item)),
                _ => None,
            };
            match (value, slot) {
                (Some(value), Some(slot)) => {
                    out.push_str(&value);
                    rest = &tail[slot.len() + 2..];
                }
                _ => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self::new(
            r#"<div class="{class}" data-id="{id}"><input id="{id}" type="checkbox"{checked}><label for="{id}">{text}</label></div>"#,
        )
    }
}

/// Turns a [`ViewState`] into markup
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    template: Option<ItemTemplate>,
}

impl Renderer {
    /// Built-in markup
    pub fn inline() -> Self {
        Self { template: None }
    }

    /// Template-based markup
    pub fn with_template(template: ItemTemplate) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn from_options(options: &SyncOptions) -> Self {
        if options.use_template {
            Self::with_template(ItemTemplate::default())
        } else {
            Self::inline()
        }
    }

    pub fn render_item(&self, item: &ViewItem) -> String {
        match &self.template {
            Some(template) => template.fill(item),
            None => {
                let id = escape_html(&item.id);
                format!(
                    r#"<div class="{}"><label for="{id}"><input id="{id}" type="checkbox"{}>{}</label></div>"#,
                    item_class(item),
                    checked_attr(item),
                    escape_html(&item.text),
                )
            }
        }
    }

    /// Render the whole surface, one element per line
    pub fn render(&self, state: &ViewState) -> String {
        let mut lines = Vec::with_capacity(state.len() + 1);
        if state.shows_placeholder() {
            lines.push(format!("<p>{}</p>", EMPTY_PLACEHOLDER));
        }
        lines.extend(state.items().iter().map(|item| self.render_item(item)));
        lines.join("\n")
    }
}

fn item_class(item: &ViewItem) -> String {
    if item.done {
        "todo-item done".to_string()
    } else {
        "todo-item".to_string()
    }
}

fn checked_attr(item: &ViewItem) -> &'static str {
    if item.checked { r#" checked="checked""# } else { "" }
}

/// Escape text for HTML content and attribute values
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Patch, reconcile};
    use todo_protocol::TodoRecord;

    fn item(id: &str, text: &str, done: bool) -> ViewItem {
        ViewItem::from_record(&TodoRecord::new(id, text, done))
    }

    #[test]
    fn test_inline_item() {
        let html = Renderer::inline().render_item(&item("a", "Buy milk", false));
        assert_eq!(
            html,
            r#"<div class="todo-item"><label for="a"><input id="a" type="checkbox">Buy milk</label></div>"#
        );
    }

    #[test]
    fn test_done_item_is_checked_and_styled() {
        let html = Renderer::inline().render_item(&item("a", "x", true));
        assert!(html.contains(r#"class="todo-item done""#));
        assert!(html.contains(r#"checked="checked""#));
    }

    #[test]
    fn test_template_item() {
        let renderer = Renderer::with_template(ItemTemplate::new("<li id=\"{id}\">{text}{checked}</li>"));
        assert_eq!(
            renderer.render_item(&item("b", "y", false)),
            r#"<li id="b">y</li>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = Renderer::inline().render_item(&item("a\"", "<script>", false));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"for="a&quot;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_template_text_with_slot_syntax_is_not_reexpanded() {
        let html = Renderer::with_template(ItemTemplate::default())
            .render_item(&item("z", "{id}", false));
        assert!(html.contains(">{id}</label>"));

        let html = Renderer::with_template(ItemTemplate::default())
            .render_item(&item("{text}", "t", false));
        assert!(html.contains(r#"data-id="{text}""#));
    }

    #[test]
    fn test_template_keeps_unknown_braces() {
        let renderer = Renderer::with_template(ItemTemplate::new("{x}{id}{"));
        assert_eq!(renderer.render_item(&item("q", "t", false)), "{x}q{");
    }

    #[test]
    fn test_render_placeholder() {
        let mut state = ViewState::new();
        state.apply_all(&reconcile(&ViewState::new(), &[]));
        assert_eq!(
            Renderer::inline().render(&state),
            "<p>There are no tasks for you today</p>"
        );

        state.apply(&Patch::Clear);
        assert_eq!(Renderer::inline().render(&state), "");
    }
}
