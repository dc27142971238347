//! Window arrangement for the application screen.
//!
//! Turns an immutable snapshot of UI state into a box tree and resolves it.
//! Every closure placed in the tree captures plain values from the snapshot,
//! never live application state.

use std::collections::HashMap;

use crate::config::{GuiConfig, MainPanelSplitMode, PortraitMode, ScreenMode, SideViewLocation};
use crate::geometry::{Dimensions, Size};
use crate::width::display_len;

use super::core::{Direction, LayoutBox, arrange_windows};

pub const MAIN_WINDOW: &str = "main";
pub const SECONDARY_WINDOW: &str = "secondary";
pub const EXTRAS_WINDOW: &str = "extras";
pub const LIMIT_WINDOW: &str = "limit";
pub const STASH_WINDOW: &str = "stash";

/// Windows of the side section, top to bottom.
pub const SIDE_WINDOWS: [&str; 5] = ["status", "files", "branches", "commits", STASH_WINDOW];

const STATUS_SPACER_PREFIX: &str = "statusSpacer";

/// Window names derived from the focus stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusWindows {
    /// Window of the focused context.
    pub current: String,
    /// Window of the topmost non-popup context.
    pub current_static: String,
    /// Window of the topmost side context.
    pub current_side: String,
}

impl FocusWindows {
    pub fn uniform(window: impl Into<String>) -> Self {
        let window = window.into();
        Self {
            current: window.clone(),
            current_static: window.clone(),
            current_side: window,
        }
    }
}

/// Everything a layout pass needs to know about the application.
#[derive(Debug, Clone, Default)]
pub struct ArrangementArgs {
    pub size: Size,
    pub config: GuiConfig,
    pub windows: FocusWindows,
    /// The main panel shows two views, e.g. staged and unstaged changes.
    pub split_main_panel: bool,
    pub screen_mode: ScreenMode,
    /// Loader or toast text shown bottom left.
    pub app_status: String,
    /// Text shown bottom right; may contain colour escapes.
    pub information: String,
    /// Show the command log window.
    pub show_extras_window: bool,
    pub in_demo: bool,
    /// A rebase, cherry-pick or similar mode is in progress.
    pub is_any_mode_active: bool,
    pub in_search_prompt: bool,
    pub search_prefix: String,
}

/// Resolve the rectangle of every window on screen.
pub fn window_dimensions(args: &ArrangementArgs) -> HashMap<String, Dimensions> {
    let width = i32::from(args.size.width);
    let height = i32::from(args.size.height);

    let (side_weight, main_weight) = mid_section_weights(args);

    let side_direction = if use_portrait_mode(args) {
        Direction::Row
    } else {
        Direction::Column
    };

    let show_info_section = args.config.show_bottom_line
        || args.in_search_prompt
        || args.is_any_mode_active
        || !args.app_status.is_empty();
    let info_section_size = if show_info_section { 1 } else { 0 };

    let root = LayoutBox::row(vec![
        LayoutBox::container(
            side_direction,
            vec![
                side_section(args).weight(side_weight),
                LayoutBox::row(main_panel_children(args)).weight(main_weight),
            ],
        )
        .weight(1),
        LayoutBox::column(info_section_children(args)).size(info_section_size),
    ]);

    let mut windows = arrange_windows(&root, 0, 0, width, height);
    windows.extend(arrange_windows(
        &LayoutBox::window(LIMIT_WINDOW),
        0,
        0,
        width,
        height,
    ));
    windows
}

fn use_portrait_mode(args: &ArrangementArgs) -> bool {
    if args.screen_mode == ScreenMode::Half {
        return args.config.enlarged_side_view_location == SideViewLocation::Top;
    }

    match args.config.portrait_mode {
        PortraitMode::Never => false,
        PortraitMode::Always => true,
        PortraitMode::Auto => args.size.width <= 84 && args.size.height > 45,
    }
}

fn mid_section_weights(args: &ArrangementArgs) -> (i32, i32) {
    // a ratio of .25 means a weight of 1 against 3
    let mut main_weight = ((1.0 / args.config.side_panel_width) as i32 - 1).max(0);
    let mut side_weight = 1;

    if split_main_panel_side_by_side(args) {
        main_weight = 5;
    }

    if args.windows.current == MAIN_WINDOW {
        if matches!(args.screen_mode, ScreenMode::Half | ScreenMode::Full) {
            side_weight = 0;
        }
    } else {
        match args.screen_mode {
            ScreenMode::Half => {
                main_weight = match args.config.enlarged_side_view_location {
                    SideViewLocation::Top => 2,
                    SideViewLocation::Left => 1,
                };
            }
            ScreenMode::Full => main_weight = 0,
            ScreenMode::Normal => {}
        }
    }

    (side_weight, main_weight)
}

fn split_main_panel_side_by_side(args: &ArrangementArgs) -> bool {
    if !args.split_main_panel {
        return false;
    }

    match args.config.main_panel_split_mode {
        MainPanelSplitMode::Vertical => false,
        MainPanelSplitMode::Horizontal => true,
        // two 80 column panels plus 40 for the side section
        MainPanelSplitMode::Flexible => !(args.size.width < 200 && args.size.height > 30),
    }
}

fn side_section(args: &ArrangementArgs) -> LayoutBox {
    let screen_mode = args.screen_mode;
    let current_side = args.windows.current_side.clone();
    let accordion = args.config.expand_focused_side_panel;
    let expanded_weight = args.config.expanded_side_panel_weight;

    LayoutBox::conditional(Direction::Row, move |_width, height| {
        if matches!(screen_mode, ScreenMode::Half | ScreenMode::Full) {
            return SIDE_WINDOWS
                .iter()
                .map(|window| {
                    let leaf = LayoutBox::window(*window);
                    if *window == current_side {
                        leaf.weight(1)
                    } else {
                        leaf.size(0)
                    }
                })
                .collect();
        }

        if height >= 28 {
            let expand = |leaf: LayoutBox| {
                if accordion && leaf.window.as_deref() == Some(current_side.as_str()) {
                    leaf.weight(expanded_weight)
                } else {
                    leaf
                }
            };

            let stash = LayoutBox::window(STASH_WINDOW);
            let stash = if current_side == STASH_WINDOW {
                stash.weight(1)
            } else {
                stash.size(3)
            };

            return vec![
                LayoutBox::window(SIDE_WINDOWS[0]).size(3),
                expand(LayoutBox::window(SIDE_WINDOWS[1]).weight(1)),
                expand(LayoutBox::window(SIDE_WINDOWS[2]).weight(1)),
                expand(LayoutBox::window(SIDE_WINDOWS[3]).weight(1)),
                expand(stash),
            ];
        }

        let squashed = if height >= 21 { 3 } else { 1 };
        SIDE_WINDOWS
            .iter()
            .map(|window| {
                let leaf = LayoutBox::window(*window);
                if *window == current_side {
                    leaf.weight(1)
                } else {
                    leaf.size(squashed)
                }
            })
            .collect()
    })
}

fn main_panel_children(args: &ArrangementArgs) -> Vec<LayoutBox> {
    let direction = if split_main_panel_side_by_side(args) {
        Direction::Column
    } else {
        Direction::Row
    };

    let mut children = vec![LayoutBox::container(direction, main_section_children(args)).weight(1)];
    if args.show_extras_window {
        children.push(LayoutBox::window(EXTRAS_WINDOW).size(extras_window_size(args)));
    }
    children
}

fn main_section_children(args: &ArrangementArgs) -> Vec<LayoutBox> {
    let main_maximised =
        args.screen_mode == ScreenMode::Full && args.windows.current == MAIN_WINDOW;
    if !args.split_main_panel || main_maximised {
        return vec![LayoutBox::window(MAIN_WINDOW).weight(1)];
    }

    vec![
        LayoutBox::window(MAIN_WINDOW).weight(1),
        LayoutBox::window(SECONDARY_WINDOW).weight(1),
    ]
}

fn extras_window_size(args: &ArrangementArgs) -> i32 {
    const FRAME: i32 = 2;
    let base: i32 = if args.windows.current_static == EXTRAS_WINDOW {
        // cropped by the solver to whatever is available
        1000
    } else if args.size.height < 40 {
        1
    } else {
        args.config.command_log_size
    };
    base.saturating_add(FRAME)
}

fn info_section_children(args: &ArrangementArgs) -> Vec<LayoutBox> {
    if args.in_search_prompt {
        return vec![
            LayoutBox::window("searchPrefix").size(display_len(&args.search_prefix)),
            LayoutBox::window("search").weight(1),
        ];
    }

    let mut spacers = SpacerNames::default();
    let mut items = Vec::new();

    // app status appears only briefly in demos and would dislodge the caption
    if !args.in_demo && !args.app_status.is_empty() {
        items.push(LayoutBox::window("appStatus").size(display_len(&args.app_status)));
    }

    if args.config.show_bottom_line {
        items.push(LayoutBox::window("options").weight(1));
    }

    if (!args.in_demo && args.config.show_bottom_line) || args.is_any_mode_active {
        items.push(LayoutBox::window("information").size(display_len(&args.information)));
    }

    let first_is_status = items
        .first()
        .is_some_and(|item| item.window.as_deref() == Some("appStatus"));
    if items.len() == 2 && first_is_status {
        // keeps information right-aligned; the fixed spacer below still
        // guarantees a gap when space runs out
        items.insert(1, LayoutBox::window(spacers.next()).weight(1));
    } else if items.len() == 1 {
        if items[0].window.as_deref() == Some("information") {
            items.insert(0, LayoutBox::window(spacers.next()).weight(1));
        } else {
            items[0] = items[0].clone().weight(1);
        }
    }

    let mut idx = items.len();
    while idx > 1 {
        idx -= 1;
        if !is_spacer(&items[idx]) {
            items.insert(idx, LayoutBox::window(spacers.next()).size(1));
        }
    }

    items
}

fn is_spacer(item: &LayoutBox) -> bool {
    item.window
        .as_deref()
        .is_some_and(|window| window.starts_with(STATUS_SPACER_PREFIX))
}

#[derive(Default)]
struct SpacerNames {
    issued: usize,
}

impl SpacerNames {
    fn next(&mut self) -> String {
        self.issued += 1;
        format!("{STATUS_SPACER_PREFIX}{}", self.issued)
    }
}
