//! Screen geometry shared by rendering and pointer hit-testing.
//!
//! `compute_layout` is pure: the same area and state always give the same
//! rectangles, so a click can be tested against exactly what was drawn.
//! Every rectangle is clipped to the frame area.

use ratatui::layout::{Position, Rect};

use super::state::{DisplayState, MenuItem, MENU_ITEMS};

// ============================================================================
// DIMENSIONS
// ============================================================================

pub const CARD_MAX_WIDTH: u16 = 44;
pub const DIGIT_ROWS: u16 = 5;
pub const BUTTON_WIDTH: u16 = 7;
pub const BUTTON_HEIGHT: u16 = 3;
pub const BUTTON_GAP: u16 = 2;
pub const MENU_WIDTH: u16 = 22;
/// Border + gauge item + divider + theme items + border.
pub const MENU_HEIGHT: u16 = 2 + 1 + 1 + (MENU_ITEMS.len() as u16 - 1);

// ============================================================================
// REGIONS
// ============================================================================

/// Where everything lands for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    pub area: Rect,
    pub card: Rect,
    pub number: Rect,
    pub gauge: Option<Rect>,
    pub gauge_label: Option<Rect>,
    pub play: Rect,
    pub generate: Rect,
    pub menu_button: Rect,
    /// The dropdown, when open.
    pub menu: Option<Rect>,
    pub divider: Option<Rect>,
    /// One row per item, in `MENU_ITEMS` order.
    pub menu_items: Vec<(MenuItem, Rect)>,
    pub help: Rect,
}

/// The area an outside click is measured against: the menu button plus
/// the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRegion {
    pub button: Rect,
    pub dropdown: Rect,
}

impl MenuRegion {
    pub fn contains(&self, pos: Position) -> bool {
        self.button.contains(pos) || self.dropdown.contains(pos)
    }
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PlayPause,
    Generate,
    MenuButton,
    MenuItem(MenuItem),
    /// Inside the dropdown but not on an item (border, divider).
    MenuBody,
    Outside,
}

impl Regions {
    pub fn menu_region(&self) -> Option<MenuRegion> {
        self.menu.map(|dropdown| MenuRegion {
            button: self.menu_button,
            dropdown,
        })
    }

    /// Hit-test a cell. The dropdown is drawn on top, so it wins.
    pub fn hit(&self, pos: Position) -> Target {
        if let Some(menu) = self.menu {
            if menu.contains(pos) {
                return self
                    .menu_items
                    .iter()
                    .find(|(_, rect)| rect.contains(pos))
                    .map(|(item, _)| Target::MenuItem(*item))
                    .unwrap_or(Target::MenuBody);
            }
        }
        if self.play.contains(pos) {
            Target::PlayPause
        } else if self.generate.contains(pos) {
            Target::Generate
        } else if self.menu_button.contains(pos) {
            Target::MenuButton
        } else {
            Target::Outside
        }
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Centre a `width` x `height` box in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Clip to `bounds`. Anything that falls outside collapses to an empty
/// rect at the bounds' origin, so it can never be hit or drawn.
fn clip(rect: Rect, bounds: Rect) -> Rect {
    let clipped = rect.intersection(bounds);
    if clipped.is_empty() {
        Rect::new(bounds.x, bounds.y, 0, 0)
    } else {
        clipped
    }
}

/// One row inside `outer`, starting at `y`, clipped.
fn row(outer: Rect, y: u16, height: u16) -> Rect {
    clip(Rect::new(outer.x, y, outer.width, height), outer)
}

pub fn card_height(show_gauge: bool) -> u16 {
    // border, pad, digits, gap, [bar, label, gap], buttons, pad, border
    let gauge = if show_gauge { 3 } else { 0 };
    1 + 1 + DIGIT_ROWS + 1 + gauge + BUTTON_HEIGHT + 1 + 1
}

/// Compute every region for `state` drawn into `area`.
pub fn compute_layout(area: Rect, state: &DisplayState) -> Regions {
    let help = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, area.height.min(1));
    let body = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));

    let card = centered(body, CARD_MAX_WIDTH, card_height(state.show_gauge));
    let inner = Rect::new(
        card.x + 1u16.min(card.width),
        card.y + 1u16.min(card.height),
        card.width.saturating_sub(2),
        card.height.saturating_sub(2),
    );

    let mut y = inner.y + 1;
    let number = row(inner, y, DIGIT_ROWS);
    y += DIGIT_ROWS + 1;

    let (gauge, gauge_label) = if state.show_gauge {
        let bar = row(inner, y, 1);
        let bar = Rect::new(
            bar.x + 2u16.min(bar.width),
            bar.y,
            bar.width.saturating_sub(4),
            bar.height,
        );
        let label = row(inner, y + 1, 1);
        y += 3;
        (Some(bar), Some(label))
    } else {
        (None, None)
    };

    let controls_width = BUTTON_WIDTH * 3 + BUTTON_GAP * 2;
    let controls_x = inner.x + inner.width.saturating_sub(controls_width) / 2;
    let button = |i: u16| {
        clip(
            Rect::new(
                controls_x + i * (BUTTON_WIDTH + BUTTON_GAP),
                y,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            inner,
        )
    };
    let play = button(0);
    let generate = button(1);
    let menu_button = button(2);

    let mut regions = Regions {
        area,
        card,
        number,
        gauge,
        gauge_label,
        play,
        generate,
        menu_button,
        menu: None,
        divider: None,
        menu_items: Vec::new(),
        help,
    };

    if state.menu.is_open() {
        layout_menu(area, &mut regions);
    }
    regions
}

/// Dropdown above the menu button, centred on it, kept inside `area`.
fn layout_menu(area: Rect, regions: &mut Regions) {
    let anchor = regions.menu_button;
    let width = MENU_WIDTH.min(area.width);
    let centre = anchor.x + anchor.width / 2;
    let max_x = area.right().saturating_sub(width);
    let x = centre.saturating_sub(width / 2).clamp(area.x, max_x.max(area.x));
    let y = anchor.y.saturating_sub(MENU_HEIGHT).max(area.y);
    let menu = clip(Rect::new(x, y, width, MENU_HEIGHT), area);

    let inner = Rect::new(
        menu.x + 1u16.min(menu.width),
        menu.y + 1u16.min(menu.height),
        menu.width.saturating_sub(2),
        menu.height.saturating_sub(2),
    );

    let mut items = Vec::with_capacity(MENU_ITEMS.len());
    let mut divider = None;
    let mut row_y = inner.y;
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        items.push((*item, row(inner, row_y, 1)));
        row_y += 1;
        if i == 0 {
            divider = Some(row(inner, row_y, 1));
            row_y += 1;
        }
    }

    regions.menu = Some(menu);
    regions.divider = divider;
    regions.menu_items = items;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::MenuState;
    use crate::types::{RunConfig, Theme};

    fn state(show_gauge: bool, open: bool) -> DisplayState {
        let mut s = DisplayState::new(42, &RunConfig::default());
        s.show_gauge = show_gauge;
        if open {
            s.menu = MenuState::Open { cursor: 0 };
        }
        s
    }

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn centre(r: Rect) -> Position {
        Position::new(r.x + r.width / 2, r.y + r.height / 2)
    }

    #[test]
    fn card_is_centred_and_capped() {
        let r = compute_layout(area(), &state(true, false));
        assert_eq!(r.card.width, CARD_MAX_WIDTH);
        assert_eq!(r.card.x, (80 - CARD_MAX_WIDTH) / 2);
        assert_eq!(r.card.height, card_height(true));
    }

    #[test]
    fn gauge_regions_exist_only_when_shown() {
        let shown = compute_layout(area(), &state(true, false));
        assert!(shown.gauge.is_some() && shown.gauge_label.is_some());
        let hidden = compute_layout(area(), &state(false, false));
        assert!(hidden.gauge.is_none() && hidden.gauge_label.is_none());
        assert!(hidden.card.height < shown.card.height);
    }

    #[test]
    fn buttons_do_not_overlap() {
        let r = compute_layout(area(), &state(true, false));
        assert!(r.play.right() <= r.generate.x);
        assert!(r.generate.right() <= r.menu_button.x);
    }

    #[test]
    fn menu_sits_above_button_when_open() {
        let r = compute_layout(area(), &state(true, true));
        let menu = r.menu.expect("menu open");
        assert_eq!(menu.bottom(), r.menu_button.y);
        assert_eq!(menu.height, MENU_HEIGHT);
        assert_eq!(r.menu_items.len(), MENU_ITEMS.len());
    }

    #[test]
    fn closed_menu_has_no_dropdown_regions() {
        let r = compute_layout(area(), &state(true, false));
        assert!(r.menu.is_none());
        assert!(r.menu_items.is_empty());
        assert!(r.menu_region().is_none());
    }

    #[test]
    fn divider_follows_gauge_item() {
        let r = compute_layout(area(), &state(true, true));
        let gauge_item = r.menu_items[0].1;
        let divider = r.divider.expect("divider");
        assert_eq!(divider.y, gauge_item.y + 1);
        assert_eq!(r.menu_items[1].1.y, divider.y + 1);
    }

    #[test]
    fn hit_maps_cells_to_targets() {
        let r = compute_layout(area(), &state(true, true));
        assert_eq!(r.hit(centre(r.play)), Target::PlayPause);
        assert_eq!(r.hit(centre(r.generate)), Target::Generate);
        assert_eq!(r.hit(centre(r.menu_button)), Target::MenuButton);
        assert_eq!(r.hit(Position::new(0, 0)), Target::Outside);

        let (item, rect) = r.menu_items[3];
        assert_eq!(item, MenuItem::Theme(Theme::System));
        assert_eq!(r.hit(centre(rect)), Target::MenuItem(item));

        let divider = r.divider.unwrap();
        assert_eq!(r.hit(centre(divider)), Target::MenuBody);
    }

    #[test]
    fn menu_region_includes_button_and_dropdown() {
        let r = compute_layout(area(), &state(true, true));
        let region = r.menu_region().unwrap();
        assert!(region.contains(centre(r.menu_button)));
        assert!(region.contains(centre(r.menu.unwrap())));
        assert!(!region.contains(centre(r.play)));
        assert!(!region.contains(Position::new(0, 0)));
    }

    #[test]
    fn tiny_area_keeps_everything_inside() {
        let tiny = Rect::new(0, 0, 20, 8);
        let r = compute_layout(tiny, &state(true, true));
        for rect in [r.card, r.number, r.play, r.generate, r.menu_button, r.help] {
            assert!(tiny.union(rect) == tiny, "{:?} escapes {:?}", rect, tiny);
        }
        let menu = r.menu.unwrap();
        assert!(tiny.union(menu) == tiny);
    }
}
