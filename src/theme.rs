//! Centralized theme and styling for the signup form
//!
//! All colors and styles the form renders with live here, so the view code never
//! hardcodes a `Color`.
//!
//! # Usage
//! ```rust
//! use signup_tui::theme::{Colors, Styles, UiText};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let button = Styles::button_enabled();
//! assert_eq!(UiText::SUBMIT, "Create Account");
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the form
pub struct Colors;

impl Colors {
    /// Primary dark background
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Enabled submit button
    pub const SUCCESS: Color = Color::Green;

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Text on a filled button
    pub const BUTTON_FG: Color = Color::Black;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;

    /// Key label in the hint bar
    pub const NAV_KEY: Color = Color::Yellow;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

pub struct Styles;

impl Styles {
    /// Normal text
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Placeholder text in an empty input
    pub fn placeholder() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Panel background
    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Submit button while credentials are valid
    pub fn button_enabled() -> Style {
        Style::default()
            .fg(Colors::BUTTON_FG)
            .bg(Colors::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Submit button while credentials are incomplete
    pub fn button_disabled() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .add_modifier(Modifier::DIM)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Key name inside a navigation hint
    pub fn nav_key() -> Style {
        Style::default()
            .fg(Colors::NAV_KEY)
            .add_modifier(Modifier::BOLD)
    }
}

// =============================================================================
// TEXT CONSTANTS
// =============================================================================

/// UI text strings
pub struct UiText;

impl UiText {
    pub const TITLE: &'static str = " Create your account ";
    pub const SUBMIT: &'static str = "Create Account";

    /// Character shown in place of each password character
    pub const MASK: char = '•';
}
