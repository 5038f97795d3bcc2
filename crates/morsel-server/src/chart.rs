//! Server-side SVG line chart for a [`ViewModel`].
//!
//! The chart is one continuous line through the daily totals plus a dashed
//! vertical marker at the price increase date, drawn with `plotters` into
//! an in-memory SVG document.

use chrono::{Days, NaiveDate};
use morsel_core::ViewModel;
use morsel_core::insight::format_currency;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{ServerError, ServerResult};

/// Element id of the chart container.
pub const CHART_ID: &str = "sales-chart";

const WIDTH: u32 = 960;
const HEIGHT: u32 = 480;
const LINE_COLOR: RGBColor = RGBColor(46, 134, 171);
const FONT: &str = "sans-serif";

/// Render the chart container and its SVG.
pub fn render_chart(view: &ViewModel) -> ServerResult<String> {
    let mut svg = String::with_capacity(16 * 1024);
    draw(view, &mut svg).map_err(|e| ServerError::Chart(e.to_string()))?;
    Ok(format!(r#"<div id="{CHART_ID}" class="chart">{svg}</div>"#))
}

/// X range covering the series. A single day gets one day of margin on
/// each side so it is not drawn on the axis.
fn date_range(first: NaiveDate, last: NaiveDate) -> (NaiveDate, NaiveDate) {
    if first == last {
        (first - Days::new(1), last + Days::new(1))
    } else {
        (first, last)
    }
}

fn draw(view: &ViewModel, svg: &mut String) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let title = format!("Pink Morsel Sales Over Time ({})", view.region_label);

    let (Some(first), Some(last)) = (view.series.first(), view.series.last()) else {
        let root = root.titled(&title, (FONT, 24))?;
        let centered = (FONT, 18)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let (w, h) = root.dim_in_pixel();
        root.draw(&Text::new(
            format!("No sales data for {}", view.region_label),
            (w as i32 / 2, h as i32 / 2),
            centered,
        ))?;
        root.present()?;
        return Ok(());
    };

    let (start, end) = date_range(first.date, last.date);
    let max_sales = view
        .series
        .iter()
        .map(|d| d.sales)
        .filter(|s| s.is_finite())
        .fold(0.0, f64::max);
    let y_max = match max_sales * 1.1 {
        top if top.is_finite() && top > 0.0 => top,
        _ if max_sales > 0.0 => max_sales,
        _ => 1.0,
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, (FONT, 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(start..end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(6)
        .x_desc("Date")
        .y_desc("Total Daily Sales ($)")
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|v: &f64| format_currency(*v))
        .draw()?;

    chart.draw_series(LineSeries::new(
        view.series
            .iter()
            .filter(|d| d.sales.is_finite())
            .map(|d| (d.date, d.sales)),
        LINE_COLOR.stroke_width(2),
    ))?;

    if (start..=end).contains(&view.cutoff) {
        chart.draw_series(DashedLineSeries::new(
            [(view.cutoff, 0.0), (view.cutoff, y_max)],
            8,
            5,
            RED.stroke_width(2),
        ))?;

        let label = (FONT, 14).into_font().color(&RED);
        chart.draw_series(std::iter::once(
            EmptyElement::at((view.cutoff, y_max))
                + Text::new("Price Increase".to_string(), (6, 6), label.clone())
                + Text::new(view.cutoff.format("%b %-d, %Y").to_string(), (6, 24), label),
        ))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morsel_core::{PRICE_INCREASE_DATE, Region, RegionFilter, SalesRecord, compute_view};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_chart_has_line_and_marker() {
        let records = vec![
            SalesRecord::new(date("2021-01-10"), Region::North, 100.0),
            SalesRecord::new(date("2021-01-20"), Region::North, 200.0),
        ];
        let view = compute_view(&records, RegionFilter::All, PRICE_INCREASE_DATE);
        let html = render_chart(&view).unwrap();

        assert!(html.starts_with(r#"<div id="sales-chart""#));
        assert!(html.contains("<svg"));
        assert!(html.contains("<polyline"));
        assert!(html.contains("Pink Morsel Sales Over Time (All Regions)"));
        assert!(html.contains("Price Increase"));
        assert!(html.contains("Jan 15, 2021"));
        assert!(html.contains("Total Daily Sales ($)"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_marker_outside_range_is_omitted() {
        let records = vec![
            SalesRecord::new(date("2021-02-10"), Region::East, 100.0),
            SalesRecord::new(date("2021-02-20"), Region::East, 200.0),
        ];
        let view = compute_view(&records, RegionFilter::All, PRICE_INCREASE_DATE);
        let html = render_chart(&view).unwrap();
        assert!(!html.contains("Price Increase"));
        assert!(!html.contains("Jan 15, 2021"));
    }

    #[test]
    fn test_empty_chart() {
        let view = compute_view(&[], RegionFilter::Only(Region::West), PRICE_INCREASE_DATE);
        let html = render_chart(&view).unwrap();
        assert!(html.contains("No sales data for West"));
        assert!(!html.contains("<polyline"));
    }

    #[test]
    fn test_overflowing_day_is_not_plotted() {
        let records = vec![
            SalesRecord::new(date("2021-01-10"), Region::North, 1e308),
            SalesRecord::new(date("2021-01-10"), Region::South, 1e308),
            SalesRecord::new(date("2021-01-20"), Region::North, 5.0),
        ];
        let view = compute_view(&records, RegionFilter::All, PRICE_INCREASE_DATE);
        let html = render_chart(&view).unwrap();
        assert!(!html.contains("NaN"));
        assert!(!html.contains("inf"));
    }

    #[test]
    fn test_single_day_range_is_padded() {
        let (start, end) = date_range(date("2021-01-15"), date("2021-01-15"));
        assert_eq!(start, date("2021-01-14"));
        assert_eq!(end, date("2021-01-16"));
        assert!((start..=end).contains(&PRICE_INCREASE_DATE));
    }
}
