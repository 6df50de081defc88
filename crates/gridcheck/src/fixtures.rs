//! Reference fixture data
//!
//! Every value, style and property the reference document carries is defined
//! here once. [`feature_matrix`] lays them out by row; the builder writes that
//! layout and the checkers derive their expectations from the same table.

use chrono::{DateTime, TimeZone, Utc};
use gridcheck_core::{
    Alignment, Border, BorderEdge, BorderLineStyle, CellAddress, CellRange, CellValue, Color,
    Fill, Font, FormulaValue, GradientStop, HorizontalAlignment, HyperlinkValue, PageOrientation,
    DataValidation, PageSetup, PatternType, ReadingOrder, SheetProperties, Style, Underline,
    ValidationErrorStyle, ValidationOperator, VerticalAlignment, WorkbookView,
};

/// Name of the feature worksheet in the reference document
pub const SHEET_NAME: &str = "blort";

/// Name of the data validation worksheet
pub const VALIDATION_SHEET_NAME: &str = "data-validations";

pub const STR: &str = "Hello, World!";
pub const STR2: &str = "<a href=\"www.whatever.com\">Talk to the H&</a>";

pub const NUM_FMT_1: &str = "# ?/?";
pub const NUM_FMT_2: &str = "[Green]#,##0 ;[Red](#,##0)";
pub const NUM_FMT_DATE: &str = "dd, mmm yyyy";

/// Row and column carrying the outline level
pub const OUTLINE_ROW: u32 = 10;
pub const OUTLINE_COL: u32 = 10;
pub const OUTLINE_LEVEL: u8 = 1;

/// Tab color expected on the reference sheet
pub const TAB_COLOR: &str = "FF00FF00";

const RED: Color = Color::argb(0xFF, 0xFF, 0x00, 0x00);
const GREEN: Color = Color::argb(0xFF, 0x00, 0xFF, 0x00);
const BLUE: Color = Color::argb(0xFF, 0x00, 0x00, 0xFF);

pub fn date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 5, 11, 12, 30, 45)
        .single()
        .unwrap_or_default()
        + chrono::Duration::milliseconds(567)
}

pub fn formula_with_result() -> FormulaValue {
    FormulaValue::new("A1").with_result(7)
}

pub fn formula_without_result() -> FormulaValue {
    FormulaValue::new("A2")
}

pub fn hyperlink() -> HyperlinkValue {
    HyperlinkValue::new("www.link.com", "http://www.link.com")
}

// === Fonts ===

pub fn arial_black_ui_14() -> Font {
    Font::new("Arial Black", 14.0)
        .with_family(2)
        .with_underline(Underline::Single)
        .with_italic(true)
}

pub fn broadway_red_outline_20() -> Font {
    Font::new("Broadway", 20.0)
        .with_family(5)
        .with_outline(true)
        .with_color(RED)
}

pub fn comic_sans_ud_b_16() -> Font {
    Font::new("Comic Sans MS", 16.0)
        .with_family(4)
        .with_underline(Underline::Double)
        .with_bold(true)
}

// === Borders ===

pub fn thin() -> Border {
    Border::all(BorderLineStyle::Thin, Some(GREEN))
}

pub fn double_red() -> Border {
    Border::all(BorderLineStyle::Double, Some(RED))
}

pub fn thick_rainbow() -> Border {
    let mut border = Border::new()
        .with_left(BorderLineStyle::Thick, RED)
        .with_top(BorderLineStyle::Thick, GREEN)
        .with_right(BorderLineStyle::Thick, BLUE)
        .with_bottom(BorderLineStyle::Thick, Color::argb(0xFF, 0xFF, 0xFF, 0x00));
    border.diagonal = Some(BorderEdge::new(
        BorderLineStyle::Thick,
        Color::argb(0xFF, 0xFF, 0x00, 0xFF),
    ));
    border
}

// === Fills ===

pub fn blue_white_h_grad() -> Fill {
    Fill::linear_gradient(
        0.0,
        vec![GradientStop::new(0.0, BLUE), GradientStop::new(1.0, Color::WHITE)],
    )
}

pub fn red_dark_vertical() -> Fill {
    Fill::pattern(PatternType::DarkVertical, Some(RED), None)
}

pub fn red_green_dark_trellis() -> Fill {
    Fill::pattern(PatternType::DarkTrellis, Some(RED), Some(GREEN))
}

pub fn rgb_path_grad() -> Fill {
    Fill::path_gradient(
        0.5,
        0.5,
        vec![
            GradientStop::new(0.0, RED),
            GradientStop::new(0.5, GREEN),
            GradientStop::new(1.0, BLUE),
        ],
    )
}

// === Alignments ===

/// Labelled alignments every strict serializer accepts
pub fn alignments() -> Vec<(&'static str, Alignment)> {
    let a = Alignment::new;
    let mut list = vec![
        (
            "Top Left",
            a().with_horizontal(HorizontalAlignment::Left)
                .with_vertical(VerticalAlignment::Top),
        ),
        (
            "Middle Centre",
            a().with_horizontal(HorizontalAlignment::Center)
                .with_vertical(VerticalAlignment::Middle),
        ),
        (
            "Bottom Right",
            a().with_horizontal(HorizontalAlignment::Right)
                .with_vertical(VerticalAlignment::Bottom),
        ),
        ("Wrap Text", a().with_wrap(true)),
        ("Indent 1", a().with_indent(1)),
        ("Indent 2", a().with_indent(2)),
    ];

    let rotations: [(&'static str, i16); 12] = [
        ("Rotate 15", 15),
        ("Rotate 30", 30),
        ("Rotate 45", 45),
        ("Rotate 60", 60),
        ("Rotate 75", 75),
        ("Rotate 90", 90),
        ("Rotate -15", -15),
        ("Rotate -30", -30),
        ("Rotate -45", -45),
        ("Rotate -60", -60),
        ("Rotate -75", -75),
        ("Rotate -90", -90),
    ];
    list.extend(rotations.iter().map(|&(text, deg)| (text, a().with_rotation(deg))));

    list.extend([
        ("Vertical Text", a().vertical_text()),
        ("Shrink to Fit", a().with_shrink_to_fit(true)),
        ("Justify", a().with_horizontal(HorizontalAlignment::Justify)),
        (
            "Distributed",
            a().with_vertical(VerticalAlignment::Distributed),
        ),
        ("Left to Right", a().with_reading_order(ReadingOrder::LeftToRight)),
        ("Right to Left", a().with_reading_order(ReadingOrder::RightToLeft)),
    ]);
    list
}

/// Labelled alignments strict validation must reject
pub fn bad_alignments() -> Vec<(&'static str, Alignment)> {
    vec![
        ("Nothing", Alignment::new()),
        ("Indent -1", Alignment::new().with_indent(-1)),
        ("Indent 251", Alignment::new().with_indent(251)),
        ("Rotate -91", Alignment::new().with_rotation(-91)),
        ("Rotate 91", Alignment::new().with_rotation(91)),
    ]
}

// === Sheet and workbook ===

pub fn sheet_properties() -> SheetProperties {
    SheetProperties {
        tab_color: Color::from_argb_hex(TAB_COLOR),
        outline_level_row: OUTLINE_LEVEL,
        outline_level_col: OUTLINE_LEVEL,
        default_row_height: 15.0,
        default_col_width: None,
    }
}

pub fn page_setup() -> PageSetup {
    PageSetup {
        paper_size: 9,
        orientation: PageOrientation::Landscape,
        scale: 90,
        fit_to_width: Some(1),
        horizontal_centered: true,
        print_gridlines: true,
        print_area: Some("A1:G20".into()),
        ..PageSetup::default()
    }
}

pub fn views() -> Vec<WorkbookView> {
    vec![WorkbookView {
        x: 1,
        y: 2,
        width: 10000,
        height: 20000,
        first_sheet: 0,
        active_tab: 0,
        visibility: Default::default(),
    }]
}

// === Layout ===

/// Which capability a feature row exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Values every representation keeps
    Always,
    /// Style attributes and row heights
    Styles,
    /// Alignments a strict writer must drop
    BadAlignment,
}

/// One cell the builder writes and the checker expects
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCell {
    pub address: CellAddress,
    pub value: CellValue,
    pub style: Style,
}

/// A merged region and the value its master is given first
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMerge {
    pub range: CellRange,
    pub value: CellValue,
}

/// One row of the reference layout
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub number: u32,
    pub gate: Gate,
    /// Expected custom height; checked with styles
    pub height: Option<f64>,
    pub cells: Vec<FeatureCell>,
    /// Regions whose master lies in this row
    pub merges: Vec<FeatureMerge>,
}

impl FeatureRow {
    fn new(number: u32, gate: Gate) -> Self {
        Self {
            number,
            gate,
            height: None,
            cells: Vec::new(),
            merges: Vec::new(),
        }
    }

    fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    fn cell<V: Into<CellValue>>(mut self, col: u32, value: V, style: Style) -> Self {
        self.cells.push(FeatureCell {
            address: CellAddress::new(self.number, col),
            value: value.into(),
            style,
        });
        self
    }

    fn merge(mut self, range: CellRange, value: CellValue) -> Self {
        self.merges.push(FeatureMerge { range, value });
        self
    }
}

/// The reference layout, in row order
pub fn feature_matrix() -> Vec<FeatureRow> {
    let plain = Style::new;

    let values = FeatureRow::new(1, Gate::Always)
        .cell(1, 7, plain())
        .cell(2, STR, plain())
        .cell(3, date(), plain())
        .cell(4, formula_with_result(), plain())
        .cell(5, formula_without_result(), plain())
        .cell(6, hyperlink(), plain())
        .cell(7, STR2, plain());

    let merges = FeatureRow::new(2, Gate::Always)
        .merge(CellRange::from_coords(2, 1, 3, 2), CellValue::from(5))
        .merge(CellRange::from_coords(2, 3, 3, 4), CellValue::Null);

    let borders = FeatureRow::new(4, Gate::Styles)
        .cell(1, 1.5, plain().number_format(NUM_FMT_1).border(thin()))
        .cell(3, 1.5, plain().number_format(NUM_FMT_2).border(double_red()))
        .cell(5, 1.5, plain().border(thick_rainbow()));

    let fonts = FeatureRow::new(5, Gate::Styles)
        .cell(1, STR, plain().font(arial_black_ui_14()))
        .cell(2, STR, plain().font(broadway_red_outline_20()))
        .cell(3, STR, plain().font(comic_sans_ud_b_16()))
        .cell(
            4,
            1.6,
            plain().number_format(NUM_FMT_1).font(arial_black_ui_14()),
        )
        .cell(
            5,
            1.6,
            plain()
                .number_format(NUM_FMT_2)
                .font(broadway_red_outline_20()),
        )
        .cell(
            6,
            date(),
            plain()
                .number_format(NUM_FMT_DATE)
                .font(comic_sans_ud_b_16()),
        );

    let aligned = alignments().into_iter().zip(1u32..).fold(
        FeatureRow::new(6, Gate::Styles).height(42.0),
        |row, ((text, alignment), col)| row.cell(col, text, plain().alignment(alignment)),
    );

    let misaligned = bad_alignments().into_iter().zip(1u32..).fold(
        FeatureRow::new(7, Gate::BadAlignment),
        |row, ((text, alignment), col)| row.cell(col, text, plain().alignment(alignment)),
    );

    let fills = FeatureRow::new(8, Gate::Styles)
        .height(40.0)
        .cell(1, "Blue White Horizontal Gradient", plain().fill(blue_white_h_grad()))
        .cell(2, "Red Dark Vertical", plain().fill(red_dark_vertical()))
        .cell(3, "Red Green Dark Trellis", plain().fill(red_green_dark_trellis()))
        .cell(4, "RGB Path Gradient", plain().fill(rgb_path_grad()));

    vec![values, merges, borders, fonts, aligned, misaligned, fills]
}

// === Data validation sheet ===

/// A labelled rule on the data validation sheet
///
/// The label sits in column A of `row`; the rule covers `validation.ranges`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureValidation {
    pub row: u32,
    pub label: &'static str,
    pub validation: DataValidation,
}

/// One rule per validation kind, operator shape and message option
pub fn validation_matrix() -> Vec<FeatureValidation> {
    let cell = |row: u32| CellRange::from_coords(row, 2, row, 2);
    let entries: Vec<(&'static str, DataValidation)> = vec![
        ("List", DataValidation::list("One,Two,Three,Four")),
        (
            "Whole > 5",
            DataValidation::whole_number(ValidationOperator::GreaterThan, "5"),
        ),
        (
            "Whole 5..10",
            DataValidation::whole_number_between(ValidationOperator::Between, "5", "10")
                .with_allow_blank(false),
        ),
        (
            "Decimal < 7.5",
            DataValidation::decimal(ValidationOperator::LessThan, "7.5")
                .with_error_message("Decimal", "Must be less than 7.5"),
        ),
        (
            "Text length <= 15",
            DataValidation::text_length(ValidationOperator::LessThanOrEqual, "15")
                .with_input_message("Length", "At most 15 characters"),
        ),
        (
            "Date > 2016",
            DataValidation::date(ValidationOperator::GreaterThan, "DATE(2016,1,1)")
                .with_error_message("Date", "Must be after 2016")
                .with_error_style(ValidationErrorStyle::Warning),
        ),
        (
            "Custom",
            DataValidation::custom("MOD(B7,2)=0")
                .with_error_style(ValidationErrorStyle::Information),
        ),
    ];

    let mut matrix: Vec<FeatureValidation> = entries
        .into_iter()
        .zip(1u32..)
        .map(|((label, validation), row)| FeatureValidation {
            row,
            label,
            validation: validation.with_range(cell(row)),
        })
        .collect();

    matrix.push(FeatureValidation {
        row: 8,
        label: "Range list",
        validation: DataValidation::list("$D$1:$D$4")
            .with_range(CellRange::from_coords(8, 2, 9, 3))
            .with_range(cell(10)),
    });
    matrix
}
