use crate::foundation::error::{PairsheetError, PairsheetResult};
use crate::foundation::geom::PixelRect;
use crate::model::LayoutConfig;

/// Outer margin and inter-cell gutter, in pixels.
pub const PADDING: u32 = 20;
/// Height of each row-0 label bar, in pixels.
pub const LABEL_HEIGHT: u32 = 40;
/// Gap between a label bar and the image cell below it, in pixels.
pub const LABEL_GAP: u32 = 10;

/// Planned geometry for one gallery row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowPlan {
    /// Cell rectangle for the "before" image (left column).
    pub before: PixelRect,
    /// Cell rectangle for the "after" image (right column).
    pub after: PixelRect,
    /// Label-bar rectangles above the cells; present on row 0 only.
    pub label_bars: Option<(PixelRect, PixelRect)>,
}

/// Full geometry plan for one merge: canvas dimensions plus per-row
/// rectangles, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Final canvas width in pixels.
    pub canvas_width: u32,
    /// Final canvas height in pixels.
    pub canvas_height: u32,
    /// One entry per pair, in input order.
    pub rows: Vec<RowPlan>,
}

/// Compute the full gallery geometry. Pure function of its inputs.
///
/// Two columns of `cell_width` separated and bordered by [`PADDING`]; row 0
/// additionally carries the label bars and their gap; every row contributes
/// one `PADDING` of bottom margin, with a final trailing `PADDING` closing
/// the canvas.
pub fn plan(pair_count: usize, config: &LayoutConfig) -> PairsheetResult<LayoutPlan> {
    if config.cell_width == 0 || config.cell_height == 0 {
        return Err(PairsheetError::validation(
            "cell dimensions must be > 0",
        ));
    }
    if pair_count == 0 {
        return Err(PairsheetError::validation("pair count must be >= 1"));
    }

    let cw = u64::from(config.cell_width);
    let ch = u64::from(config.cell_height);
    let pad = u64::from(PADDING);
    let label_h = u64::from(LABEL_HEIGHT);
    let label_gap = u64::from(LABEL_GAP);
    let n = pair_count as u64;

    let canvas_width = 2 * cw + 3 * pad;
    let first_row_height = ch + label_h + label_gap + 2 * pad;
    let normal_row_height = ch + pad;
    let canvas_height = first_row_height + (n - 1) * normal_row_height + pad;

    let canvas_width = fit_u32(canvas_width, "canvas width")?;
    let canvas_height = fit_u32(canvas_height, "canvas height")?;

    let left_x = PADDING;
    let right_x = fit_u32(cw + 2 * pad, "right column x")?;

    let mut rows = Vec::with_capacity(pair_count);
    for row in 0..pair_count {
        let (y, label_bars) = if row == 0 {
            let bars = (
                PixelRect::new(left_x, PADDING, config.cell_width, LABEL_HEIGHT),
                PixelRect::new(right_x, PADDING, config.cell_width, LABEL_HEIGHT),
            );
            (PADDING + LABEL_HEIGHT + LABEL_GAP, Some(bars))
        } else {
            let y = first_row_height + (row as u64 - 1) * normal_row_height;
            (fit_u32(y, "row y offset")?, None)
        };

        rows.push(RowPlan {
            before: PixelRect::new(left_x, y, config.cell_width, config.cell_height),
            after: PixelRect::new(right_x, y, config.cell_width, config.cell_height),
            label_bars,
        });
    }

    Ok(LayoutPlan {
        canvas_width,
        canvas_height,
        rows,
    })
}

fn fit_u32(value: u64, what: &str) -> PairsheetResult<u32> {
    u32::try_from(value)
        .map_err(|_| PairsheetError::validation(format!("{what} exceeds the pixel range")))
}
