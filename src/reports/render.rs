//! Chart rendering for monthly and yearly reports
//!
//! Each report is one image with two panels, deposits on the left and
//! withdrawals on the right. Monthly reports draw a pie per panel, yearly
//! reports a line over the twelve months. Images are written into the
//! account directory and replace any earlier report for the same period.
//!
//! Slice and title computations are plain functions so they can be checked
//! without drawing anything.

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use crate::config::{ReportFormat, ReportSize};
use crate::error::{PassbookError, PassbookResult};
use crate::models::{Action, CurrencyFormat, Money};

use super::aggregate::{MonthlySummary, YearlySummary};

const FONT_FAMILY: &str = "sans-serif";
const TITLE_FONT: (&str, f64) = (FONT_FAMILY, 36.0);
const CAPTION_FONT: (&str, f64) = (FONT_FAMILY, 24.0);
const LABEL_FONT: (&str, f64) = (FONT_FAMILY, 16.0);

/// DejaVu Sans, see assets/DejaVuSans-LICENSE.txt
static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
static FONTS: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled font as the chart font family
///
/// Registration happens once per process; later calls return the first outcome.
fn register_fonts() -> PassbookResult<()> {
    FONTS
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA)
                .map_err(|_| "Failed to load chart font".to_string())
        })
        .clone()
        .map_err(PassbookError::Report)
}

/// X axis range for a year of months, padded so January and December sit inside the plot
pub fn month_axis() -> Range<u32> {
    0..13
}

/// Tick label for a month on the yearly axis; the padding ticks stay blank
pub fn month_label(month: &u32) -> String {
    if (1..=12).contains(month) {
        month.to_string()
    } else {
        String::new()
    }
}

/// Kind of report, used as the file name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Monthly,
    Yearly,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Monthly => "monthly",
            ReportKind::Yearly => "yearly",
        }
    }
}

/// One pie slice: a tag's share of its partition
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub tag: String,
    pub amount: Money,
    pub percentage: f64,
}

impl PieSlice {
    /// Slice label, e.g. `rent (45.0%)`
    pub fn label(&self) -> String {
        format!("{} ({:.1}%)", self.tag, self.percentage)
    }
}

/// Slices for one partition, in tag order
///
/// Zero-amount tags (the seed entry, typically) are left out since they
/// have no area. An all-zero partition yields no slices.
pub fn pie_slices(totals: &BTreeMap<String, Money>) -> Vec<PieSlice> {
    let total: Money = totals.values().sum();
    if total.is_zero() {
        return Vec::new();
    }

    totals
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(tag, amount)| PieSlice {
            tag: tag.clone(),
            amount: *amount,
            percentage: amount.cents() as f64 / total.cents() as f64 * 100.0,
        })
        .collect()
}

/// Panel title, e.g. `Deposits (₩) Total: 1,500`
pub fn panel_title(action: Action, currency: &CurrencyFormat, total: Money) -> String {
    let name = match action {
        Action::Deposit => "Deposits",
        Action::Withdraw => "Withdrawals",
    };
    format!("{} ({}) Total: {}", name, currency.symbol, currency.format(total))
}

/// `{kind}_report_{period}_{currency}.{ext}`
pub fn report_file_name(
    kind: ReportKind,
    period: &str,
    currency_code: &str,
    format: ReportFormat,
) -> String {
    format!(
        "{}_report_{}_{}.{}",
        kind.as_str(),
        period,
        currency_code,
        format.extension()
    )
}

/// Writes report images for one account and currency
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    save_dir: PathBuf,
    currency_code: String,
    currency: CurrencyFormat,
    format: ReportFormat,
    size: ReportSize,
}

impl ReportRenderer {
    pub fn new(
        save_dir: PathBuf,
        currency_code: impl Into<String>,
        currency: CurrencyFormat,
        format: ReportFormat,
        size: ReportSize,
    ) -> Self {
        Self {
            save_dir,
            currency_code: currency_code.into(),
            currency,
            format,
            size,
        }
    }

    pub fn output_path(&self, kind: ReportKind, period: &str) -> PathBuf {
        self.save_dir.join(report_file_name(
            kind,
            period,
            &self.currency_code,
            self.format,
        ))
    }

    /// Render the two pie charts of a monthly summary
    pub fn render_monthly(&self, summary: &MonthlySummary) -> PassbookResult<PathBuf> {
        let path = self.output_path(ReportKind::Monthly, &summary.period.compact());
        register_fonts()?;
        self.ensure_save_dir()?;

        let dims = (self.size.width, self.size.height);
        match self.format {
            ReportFormat::Png => draw_monthly(
                BitMapBackend::new(&path, dims).into_drawing_area(),
                summary,
                &self.currency,
            )?,
            ReportFormat::Svg => draw_monthly(
                SVGBackend::new(&path, dims).into_drawing_area(),
                summary,
                &self.currency,
            )?,
        }

        Ok(path)
    }

    /// Render the two line charts of a yearly summary
    pub fn render_yearly(&self, summary: &YearlySummary) -> PassbookResult<PathBuf> {
        let path = self.output_path(ReportKind::Yearly, &summary.period.compact());
        register_fonts()?;
        self.ensure_save_dir()?;

        let dims = (self.size.width, self.size.height);
        match self.format {
            ReportFormat::Png => draw_yearly(
                BitMapBackend::new(&path, dims).into_drawing_area(),
                summary,
                &self.currency,
            )?,
            ReportFormat::Svg => draw_yearly(
                SVGBackend::new(&path, dims).into_drawing_area(),
                summary,
                &self.currency,
            )?,
        }

        Ok(path)
    }

    fn ensure_save_dir(&self) -> PassbookResult<()> {
        std::fs::create_dir_all(&self.save_dir).map_err(|e| {
            PassbookError::Io(format!(
                "Failed to create {}: {}",
                self.save_dir.display(),
                e
            ))
        })
    }
}

fn report_err<E: std::fmt::Display>(err: E) -> PassbookError {
    PassbookError::Report(err.to_string())
}

fn draw_monthly<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    summary: &MonthlySummary,
    currency: &CurrencyFormat,
) -> PassbookResult<()> {
    let title = format!("Monthly report for {}", summary.period);
    let (left, right) = split_panels(&root, &title)?;

    for (area, action) in [(left, Action::Deposit), (right, Action::Withdraw)] {
        let caption = panel_title(action, currency, summary.totals.total(action));
        draw_pie(&area, &caption, &pie_slices(summary.totals.for_action(action)))?;
    }

    root.present().map_err(report_err)
}

fn draw_yearly<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    summary: &YearlySummary,
    currency: &CurrencyFormat,
) -> PassbookResult<()> {
    let title = format!("Yearly report for {}", summary.period);
    let (left, right) = split_panels(&root, &title)?;

    for (area, action, color) in [
        (left, Action::Deposit, BLUE),
        (right, Action::Withdraw, RED),
    ] {
        let caption = panel_title(action, currency, summary.totals.total(action));
        draw_months(&area, &caption, &currency.symbol, &summary.series(action), color)?;
    }

    root.present().map_err(report_err)
}

fn split_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
) -> PassbookResult<(DrawingArea<DB, Shift>, DrawingArea<DB, Shift>)> {
    root.fill(&WHITE).map_err(report_err)?;
    let body = root.titled(title, TITLE_FONT).map_err(report_err)?;
    let (width, _) = body.dim_in_pixel();
    Ok(body.split_horizontally((width / 2) as i32))
}

fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    slices: &[PieSlice],
) -> PassbookResult<()> {
    let body = area.titled(caption, CAPTION_FONT).map_err(report_err)?;
    let (width, height) = body.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);

    if slices.is_empty() {
        let style = TextStyle::from(LABEL_FONT).pos(Pos::new(HPos::Center, VPos::Center));
        return body.draw_text("no entries", &style, center).map_err(report_err);
    }

    let radius = f64::from(width.min(height)) * 0.35;
    let sizes: Vec<f64> = slices.iter().map(|s| s.amount.as_f64()).collect();
    let colors: Vec<RGBColor> = (0..slices.len()).map(slice_color).collect();
    let labels: Vec<String> = slices.iter().map(PieSlice::label).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(LABEL_FONT);
    body.draw(&pie).map_err(report_err)
}

fn draw_months<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    symbol: &str,
    series: &[(u32, Money)],
    color: RGBColor,
) -> PassbookResult<()> {
    let peak = series
        .iter()
        .map(|(_, amount)| amount.as_f64())
        .fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(month_axis(), 0f64..y_max)
        .map_err(report_err)?;

    chart
        .configure_mesh()
        .x_labels(14)
        .x_label_formatter(&month_label)
        .x_desc("Month")
        .y_desc(symbol)
        .draw()
        .map_err(report_err)?;

    let points: Vec<(u32, f64)> = series
        .iter()
        .map(|(month, amount)| (*month, amount.as_f64()))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &color))
        .map_err(report_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 5, color.filled())),
        )
        .map_err(report_err)?;

    Ok(())
}

fn slice_color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::pick(index).to_backend_color().rgb;
    RGBColor(r, g, b)
}
