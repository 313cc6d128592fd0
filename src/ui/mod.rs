//! User interface rendering module
//!
//! - `form` - the signup form view: focus, key handling and rendering
//! - `nav_bar` rendering shared by anything that shows keybinding hints

mod form;

pub use form::{FormAction, FormField, FormView};

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::components::keybindings::{FocusKind, KeybindingContext};
use crate::theme::Styles;

/// Render the keybinding hint line for the given focus
pub fn render_nav_bar(f: &mut Frame, keybinding_ctx: &KeybindingContext, focus: FocusKind, area: Rect) {
    let spans: Vec<Span> = keybinding_ctx
        .get_nav_items(focus)
        .into_iter()
        .flat_map(|item| {
            [
                Span::styled(item.key_display, Styles::nav_key()),
                Span::styled(format!(" {}  ", item.action_label), Styles::nav_hint()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
