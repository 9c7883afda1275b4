//! Responsive card grid layout.
//!
//! Pure function of (items, style, viewport width). Column counts follow the
//! site's breakpoints; gallery feature cards span two columns and two rows,
//! and span placement follows CSS grid sparse auto-flow so the computed
//! positions match what the browser renders.

use crate::catalog::Item;

/// Small-screen breakpoint (px).
pub const BREAKPOINT_SM: u32 = 640;
/// Medium breakpoint (px).
pub const BREAKPOINT_MD: u32 = 768;
/// Large breakpoint (px).
pub const BREAKPOINT_LG: u32 = 1024;
/// Extra-large breakpoint (px).
pub const BREAKPOINT_XL: u32 = 1280;

/// Gallery positions rendered as large feature tiles.
const FEATURED_GALLERY_SLOTS: [usize; 2] = [0, 5];

/// Which grid a set of cards is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    /// Menu cards: 1/2/3/4 columns, uniform tiles.
    Menu,
    /// Gallery photos: 1/2/3 columns with feature tiles.
    Gallery,
}

impl GridStyle {
    /// Column count at `viewport_width`.
    #[must_use]
    pub fn columns(self, viewport_width: u32) -> u32 {
        let steps: &[(u32, u32)] = match self {
            Self::Menu => &[(BREAKPOINT_XL, 4), (BREAKPOINT_LG, 3), (BREAKPOINT_SM, 2)],
            Self::Gallery => &[(BREAKPOINT_LG, 3), (BREAKPOINT_SM, 2)],
        };
        steps
            .iter()
            .find(|(min, _)| viewport_width >= *min)
            .map_or(1, |&(_, cols)| cols)
    }

    /// Gap between cards (px).
    #[must_use]
    pub fn gap(self, viewport_width: u32) -> u32 {
        match self {
            Self::Menu if viewport_width < BREAKPOINT_MD => 16,
            Self::Menu | Self::Gallery => 24,
        }
    }
}

/// Image shape of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAspect {
    /// 1:1.
    Square,
    /// 4:3.
    Landscape,
    /// Fixed image height in px, width follows the column.
    FixedHeight(u32),
}

impl CardAspect {
    /// CSS declaration for the image container.
    #[must_use]
    pub fn to_css(self) -> String {
        match self {
            Self::Square => "aspect-ratio: 1 / 1;".to_owned(),
            Self::Landscape => "aspect-ratio: 4 / 3;".to_owned(),
            Self::FixedHeight(px) => format!("height: {px}px;"),
        }
    }
}

/// Where one card sits in the grid. Rows and columns are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPlacement {
    /// Position in the item list.
    pub index: usize,
    /// The item's catalog id.
    pub item_id: u32,
    /// First column.
    pub column: u32,
    /// First row.
    pub row: u32,
    /// Columns spanned.
    pub col_span: u32,
    /// Rows spanned.
    pub row_span: u32,
    /// Image shape.
    pub aspect: CardAspect,
}

impl CardPlacement {
    /// CSS `grid-column` / `grid-row` declarations (one-based lines).
    #[must_use]
    pub fn grid_area_css(&self) -> String {
        format!(
            "grid-column: {} / span {}; grid-row: {} / span {};",
            self.column + 1,
            self.col_span,
            self.row + 1,
            self.row_span
        )
    }
}

/// A computed grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    /// Column count.
    pub columns: u32,
    /// Rows used by the placed cards.
    pub rows: u32,
    /// Gap between cards (px).
    pub gap: u32,
    /// One placement per item, in item order.
    pub cards: Vec<CardPlacement>,
}

impl GridLayout {
    /// CSS for the grid container.
    #[must_use]
    pub fn container_css(&self) -> String {
        format!(
            "display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); gap: {}px;",
            self.columns, self.gap
        )
    }

    /// Whether there are no cards (the caller renders the empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Lay out `items` for `style` at `viewport_width`.
#[must_use]
pub fn layout(items: &[Item], style: GridStyle, viewport_width: u32) -> GridLayout {
    let columns = style.columns(viewport_width);
    let mut flow = SparseFlow::new(columns);
    let cards = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (span, aspect) = card_shape(style, index, columns, viewport_width);
            let (column, row) = flow.place(span);
            CardPlacement {
                index,
                item_id: item.id,
                column,
                row,
                col_span: span.min(columns),
                row_span: span,
                aspect,
            }
        })
        .collect();
    GridLayout {
        columns,
        rows: flow.rows(),
        gap: style.gap(viewport_width),
        cards,
    }
}

/// Stable identity of a rendered card; changes with the category so the
/// renderer remounts cards on a swap.
#[must_use]
pub fn card_key(category_key: &str, item: &Item) -> String {
    format!("{category_key}-{}", item.id)
}

fn card_shape(
    style: GridStyle,
    index: usize,
    columns: u32,
    viewport_width: u32,
) -> (u32, CardAspect) {
    match style {
        GridStyle::Menu => {
            let height = if viewport_width >= BREAKPOINT_MD {
                256
            } else if viewport_width >= BREAKPOINT_SM {
                224
            } else {
                192
            };
            (1, CardAspect::FixedHeight(height))
        }
        GridStyle::Gallery if FEATURED_GALLERY_SLOTS.contains(&index) => {
            let span = if columns >= 2 { 2 } else { 1 };
            (span, CardAspect::Square)
        }
        GridStyle::Gallery => (1, CardAspect::Landscape),
    }
}

/// CSS grid `grid-auto-flow: row` placement for square spans.
struct SparseFlow {
    columns: u32,
    /// Occupancy per row, one bit per column.
    occupied: Vec<u64>,
    cursor_row: u32,
    cursor_col: u32,
}

impl SparseFlow {
    fn new(columns: u32) -> Self {
        Self {
            columns: columns.clamp(1, 63),
            occupied: Vec::new(),
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    /// Place a `span` × `span` item, returning its (column, row).
    fn place(&mut self, span: u32) -> (u32, u32) {
        let width = span.min(self.columns);
        loop {
            if self.cursor_col + width <= self.columns
                && self.is_free(self.cursor_row, self.cursor_col, width, span)
            {
                let (col, row) = (self.cursor_col, self.cursor_row);
                self.mark(row, col, width, span);
                self.cursor_col = col + width;
                return (col, row);
            }
            if self.cursor_col + width < self.columns {
                self.cursor_col += 1;
            } else {
                self.cursor_row += 1;
                self.cursor_col = 0;
            }
        }
    }

    fn mask(col: u32, width: u32) -> u64 {
        ((1_u64 << width) - 1) << col
    }

    fn is_free(&self, row: u32, col: u32, width: u32, height: u32) -> bool {
        let mask = Self::mask(col, width);
        (row..row + height).all(|r| {
            self.occupied
                .get(r as usize)
                .is_none_or(|bits| bits & mask == 0)
        })
    }

    fn mark(&mut self, row: u32, col: u32, width: u32, height: u32) {
        let end = (row + height) as usize;
        if self.occupied.len() < end {
            self.occupied.resize(end, 0);
        }
        let mask = Self::mask(col, width);
        for bits in &mut self.occupied[row as usize..end] {
            *bits |= mask;
        }
    }

    fn rows(&self) -> u32 {
        u32::try_from(self.occupied.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::item;

    fn items(n: u32) -> Vec<Item> {
        (1..=n).map(item).collect()
    }

    fn positions(grid: &GridLayout) -> Vec<(u32, u32)> {
        grid.cards.iter().map(|c| (c.column, c.row)).collect()
    }

    #[test]
    fn test_menu_breakpoints() {
        assert_eq!(GridStyle::Menu.columns(375), 1);
        assert_eq!(GridStyle::Menu.columns(639), 1);
        assert_eq!(GridStyle::Menu.columns(640), 2);
        assert_eq!(GridStyle::Menu.columns(1024), 3);
        assert_eq!(GridStyle::Menu.columns(1279), 3);
        assert_eq!(GridStyle::Menu.columns(1280), 4);
        assert_eq!(GridStyle::Menu.columns(2560), 4);
    }

    #[test]
    fn test_gallery_breakpoints() {
        assert_eq!(GridStyle::Gallery.columns(320), 1);
        assert_eq!(GridStyle::Gallery.columns(800), 2);
        assert_eq!(GridStyle::Gallery.columns(1920), 3);
    }

    #[test]
    fn test_menu_fills_row_major() {
        let grid = layout(&items(5), GridStyle::Menu, 1100);
        assert_eq!(grid.columns, 3);
        assert_eq!(positions(&grid), [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.rows, 2);
        assert!(grid
            .cards
            .iter()
            .all(|c| c.aspect == CardAspect::FixedHeight(256)));
    }

    #[test]
    fn test_gallery_feature_tiles_on_three_columns() {
        let grid = layout(&items(8), GridStyle::Gallery, 1200);
        assert_eq!(
            positions(&grid),
            [(0, 0), (2, 0), (2, 1), (0, 2), (1, 2), (0, 3), (2, 3), (2, 4)]
        );
        assert_eq!(grid.cards[0].col_span, 2);
        assert_eq!(grid.cards[5].row_span, 2);
        assert_eq!(grid.cards[0].aspect, CardAspect::Square);
        assert_eq!(grid.cards[1].aspect, CardAspect::Landscape);
        assert_eq!(grid.rows, 5);
    }

    #[test]
    fn test_gallery_feature_tiles_on_two_columns() {
        let grid = layout(&items(7), GridStyle::Gallery, 700);
        assert_eq!(
            positions(&grid),
            [(0, 0), (0, 2), (1, 2), (0, 3), (1, 3), (0, 4), (0, 6)]
        );
    }

    #[test]
    fn test_gallery_single_column_has_no_spans() {
        let grid = layout(&items(6), GridStyle::Gallery, 400);
        assert!(grid.cards.iter().all(|c| c.col_span == 1 && c.row_span == 1));
        assert_eq!(grid.rows, 6);
        // Feature tiles keep their square image.
        assert_eq!(grid.cards[5].aspect, CardAspect::Square);
    }

    #[test]
    fn test_empty_items_give_empty_grid() {
        let grid = layout(&[], GridStyle::Menu, 1280);
        assert!(grid.is_empty());
        assert_eq!(grid.rows, 0);
        assert_eq!(grid.columns, 4);
    }

    #[test]
    fn test_css_output() {
        let grid = layout(&items(1), GridStyle::Gallery, 1200);
        assert_eq!(
            grid.cards[0].grid_area_css(),
            "grid-column: 1 / span 2; grid-row: 1 / span 2;"
        );
        assert!(grid.container_css().contains("repeat(3, minmax(0, 1fr))"));
        assert_eq!(CardAspect::FixedHeight(192).to_css(), "height: 192px;");
    }

    #[test]
    fn card_key_includes_category() {
        assert_eq!(card_key("mains", &item(4)), "mains-4");
    }
}
