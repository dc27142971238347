//! User-facing layout configuration.
//!
//! These values never reach the solver directly; the arrangement builder
//! reads them to decide which weights and sizes go into the box tree.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PaneError, Result};

/// How much of the screen the focused window claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenMode {
    #[default]
    Normal,
    Half,
    Full,
}

impl ScreenMode {
    pub fn next(self) -> Self {
        match self {
            ScreenMode::Normal => ScreenMode::Half,
            ScreenMode::Half => ScreenMode::Full,
            ScreenMode::Full => ScreenMode::Normal,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ScreenMode::Normal => ScreenMode::Full,
            ScreenMode::Half => ScreenMode::Normal,
            ScreenMode::Full => ScreenMode::Half,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortraitMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// How a split main panel divides its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainPanelSplitMode {
    /// Side by side.
    Horizontal,
    /// Side by side when the terminal is wide enough, stacked otherwise.
    #[default]
    Flexible,
    /// Stacked.
    Vertical,
}

/// Where the side section goes in half screen mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideViewLocation {
    #[default]
    Left,
    Top,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuiConfig {
    /// Fraction of the screen width used by the side section, in `(0, 1]`.
    pub side_panel_width: f64,
    /// Give the focused side window a larger weight (accordion effect).
    pub expand_focused_side_panel: bool,
    /// Weight of the expanded side window relative to its siblings.
    pub expanded_side_panel_weight: i32,
    pub main_panel_split_mode: MainPanelSplitMode,
    pub enlarged_side_view_location: SideViewLocation,
    pub show_bottom_line: bool,
    /// Height of the command log window, excluding its frame.
    pub command_log_size: i32,
    /// Screen mode applied at startup.
    pub screen_mode: ScreenMode,
    pub portrait_mode: PortraitMode,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            side_panel_width: 0.3333,
            expand_focused_side_panel: false,
            expanded_side_panel_weight: 2,
            main_panel_split_mode: MainPanelSplitMode::Flexible,
            enlarged_side_view_location: SideViewLocation::Left,
            show_bottom_line: true,
            command_log_size: 8,
            screen_mode: ScreenMode::Normal,
            portrait_mode: PortraitMode::Auto,
        }
    }
}

impl GuiConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: GuiConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.side_panel_width > 0.0 && self.side_panel_width <= 1.0) {
            return Err(PaneError::InvalidConfig(format!(
                "sidePanelWidth must be in (0, 1], got {}",
                self.side_panel_width
            )));
        }
        if self.expanded_side_panel_weight < 1 {
            return Err(PaneError::InvalidConfig(format!(
                "expandedSidePanelWeight must be at least 1, got {}",
                self.expanded_side_panel_weight
            )));
        }
        if self.command_log_size < 0 {
            return Err(PaneError::InvalidConfig(format!(
                "commandLogSize must not be negative, got {}",
                self.command_log_size
            )));
        }
        Ok(())
    }
}
