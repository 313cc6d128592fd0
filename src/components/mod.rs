//! Reusable UI building blocks

pub mod keybindings;
