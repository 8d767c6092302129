//! Absolute (bar) rendering of a classification tally.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::classify::Classification;
use crate::error::AnalysisResult;

use super::{chart_slices, color_for, render_err, rgb_buffer_to_png, ChartStyle};

/// Render a bar chart of the tally as PNG bytes.
///
/// One bar per category (plus Others), with the count drawn above each bar.
pub fn render_bar_png(
    classification: &Classification,
    style: &ChartStyle,
) -> AnalysisResult<Vec<u8>> {
    let slices = chart_slices(classification);
    let max = slices.iter().map(|(_, count)| *count).max().unwrap_or(0);
    // Headroom above the tallest bar; a fixed range when everything is zero.
    let y_max = if max == 0 { 10.0 } else { max as f64 * 1.1 };

    let mut buf = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = root
            .titled(&style.title, ("sans-serif", 28).into_font())
            .map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0..slices.len()).into_segmented(), 0f64..y_max)
            .map_err(render_err)?;

        let labels: Vec<String> = slices.iter().map(|(name, _)| name.clone()).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Count")
            .x_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_labels(slices.len())
            .label_style(("sans-serif", 16).into_font())
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(slices.iter().enumerate().map(|(i, (_, count))| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), *count as f64),
                    ],
                    color_for(i).filled(),
                );
                bar.set_margin(0, 0, 12, 12);
                bar
            }))
            .map_err(render_err)?;

        // Value labels above each bar.
        let value_style = TextStyle::from(("sans-serif", 16).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(slices.iter().enumerate().map(|(i, (_, count))| {
                Text::new(
                    count.to_string(),
                    (SegmentValue::CenterOf(i), *count as f64 + y_max * 0.01),
                    value_style.clone(),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    rgb_buffer_to_png(style.width, style.height, buf)
}
