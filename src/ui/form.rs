//! Signup form view
//!
//! Three bound text inputs and a submit button. The view owns focus and key
//! handling; all field state lives in the [`ValidationEngine`], and the button's
//! enabled state is read from `submit_disabled` on every render.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info};

use crate::components::keybindings::{FocusKind, KeyAction, KeybindingContext};
use crate::theme::{Styles, UiText};
use crate::validation::ValidationEngine;

/// Focusable elements, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum FormField {
    #[strum(to_string = "Username")]
    Username,
    #[strum(to_string = "Password")]
    Password,
    #[strum(to_string = "Repeat Password")]
    PasswordConfirm,
    #[strum(to_string = "Create Account")]
    Submit,
}

impl FormField {
    /// Next element in tab order, wrapping around
    pub fn next(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let index = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// Previous element in tab order, wrapping around
    pub fn previous(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let index = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(index + all.len() - 1) % all.len()]
    }

    pub fn is_text(self) -> bool {
        !matches!(self, Self::Submit)
    }

    /// Rendered masked
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::PasswordConfirm)
    }

    pub fn focus_kind(self) -> FocusKind {
        if self.is_text() {
            FocusKind::TextInput
        } else {
            FocusKind::Button
        }
    }
}

/// What the caller should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    /// The enabled button was activated
    Submit,
    Quit,
}

pub struct FormView {
    engine: ValidationEngine,
    focus: FormField,
    keybindings: KeybindingContext,
    mounted: bool,
}

impl FormView {
    pub fn new(engine: ValidationEngine) -> Self {
        Self {
            engine,
            focus: FormField::Username,
            keybindings: KeybindingContext::new(),
            mounted: false,
        }
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn submit_enabled(&self) -> bool {
        !self.engine.submit_disabled()
    }

    /// Start the engine's subscriptions. Idempotent.
    pub fn mount(&mut self) {
        if !self.mounted {
            self.engine.on_appear();
            self.mounted = true;
        }
    }

    /// Cancel the engine's subscriptions. Idempotent.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.engine.on_disappear();
            self.mounted = false;
        }
    }

    /// Current raw value of a text field; empty for the button
    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Username => self.engine.username(),
            FormField::Password => self.engine.password(),
            FormField::PasswordConfirm => self.engine.password_confirm(),
            FormField::Submit => String::new(),
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.kind != KeyEventKind::Press {
            return FormAction::Continue;
        }

        match self.keybindings.resolve(self.focus.focus_kind(), &key) {
            Some(KeyAction::NextField) => {
                self.focus = self.focus.next();
            }
            Some(KeyAction::PreviousField) => {
                self.focus = self.focus.previous();
            }
            Some(KeyAction::Activate) => return self.submit(),
            Some(KeyAction::DeleteChar) => self.edit_focused(|value| {
                value.pop();
            }),
            Some(KeyAction::ClearField) => self.edit_focused(String::clear),
            Some(KeyAction::Quit) => return FormAction::Quit,
            None => {
                if let KeyCode::Char(c) = key.code {
                    let plain = !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
                    if plain {
                        self.edit_focused(|value| value.push(c));
                    }
                }
            }
        }
        FormAction::Continue
    }

    fn submit(&self) -> FormAction {
        if self.engine.submit_disabled() {
            debug!("submit ignored, credentials incomplete");
            return FormAction::Continue;
        }
        // No account service is wired in; the request stops here.
        info!(username = %self.engine.username(), "account creation requested");
        FormAction::Submit
    }

    fn edit_focused(&self, edit: impl FnOnce(&mut String)) {
        if !self.focus.is_text() {
            return;
        }
        let mut value = self.field_value(self.focus);
        edit(&mut value);
        match self.focus {
            FormField::Username => self.engine.set_username(value),
            FormField::Password => self.engine.set_password(value),
            FormField::PasswordConfirm => self.engine.set_password_confirm(value),
            FormField::Submit => {}
        }
    }

    /// Render into the whole frame
    pub fn render(&self, f: &mut Frame) {
        self.render_in(f, f.area());
    }

    pub fn render_in(&self, f: &mut Frame, area: Rect) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .title(Span::styled(UiText::TITLE, Styles::title()))
            .style(Styles::panel_bg());
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let text_fields = FormField::iter().filter(|field| field.is_text());
        for (field, row) in text_fields.zip(rows.iter()) {
            self.render_input(f, field, *row);
        }
        self.render_button(f, rows[4]);
        super::render_nav_bar(f, &self.keybindings, self.focus.focus_kind(), rows[6]);
    }

    fn placeholder(&self, field: FormField) -> String {
        let rules = self.engine.rules();
        match field {
            FormField::Username => format!(
                "{}-{} characters",
                rules.username_min_len, rules.username_max_len
            ),
            FormField::Password => format!("at least {} characters", rules.password_min_len),
            FormField::PasswordConfirm => "type the password again".to_string(),
            FormField::Submit => String::new(),
        }
    }

    fn render_input(&self, f: &mut Frame, field: FormField, area: Rect) {
        let focused = self.focus == field;
        let value = self.field_value(field);
        let shown = if field.is_secret() {
            UiText::MASK.to_string().repeat(value.chars().count())
        } else {
            value
        };

        let content = if shown.is_empty() {
            Span::styled(self.placeholder(field), Styles::placeholder())
        } else {
            Span::styled(shown.clone(), Styles::text())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", field))
            .border_style(if focused {
                Styles::border_active()
            } else {
                Styles::border_inactive()
            });
        f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

        if focused {
            let max_offset = area.width.saturating_sub(3);
            let offset = u16::try_from(shown.chars().count())
                .unwrap_or(u16::MAX)
                .min(max_offset);
            f.set_cursor_position((area.x + 1 + offset, area.y + 1));
        }
    }

    fn render_button(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == FormField::Submit;
        let style = if self.submit_enabled() {
            Styles::button_enabled()
        } else {
            Styles::button_disabled()
        };
        let label = if focused {
            format!("> {} <", UiText::SUBMIT)
        } else {
            UiText::SUBMIT.to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                Styles::border_active()
            } else {
                Styles::border_inactive()
            });
        f.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

impl Drop for FormView {
    fn drop(&mut self) {
        self.unmount();
    }
}
