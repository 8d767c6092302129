//! Proportional (pie) rendering of a classification tally.

use plotters::element::Pie;
use plotters::prelude::*;

use crate::classify::Classification;
use crate::error::AnalysisResult;

use super::{chart_slices, color_for, render_err, rgb_buffer_to_png, ChartStyle};

/// Render a pie chart of the tally as PNG bytes.
///
/// Slice percentages are drawn inside the pie, category names alongside.
/// An all-zero tally (empty column) renders a placeholder instead of
/// failing.
pub fn render_pie_png(
    classification: &Classification,
    style: &ChartStyle,
) -> AnalysisResult<Vec<u8>> {
    let slices = chart_slices(classification);
    let total: usize = slices.iter().map(|(_, count)| count).sum();

    let mut buf = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let root = root
            .titled(&style.title, ("sans-serif", 28).into_font())
            .map_err(render_err)?;

        let (w, h) = root.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);

        if total == 0 {
            root.draw(&Text::new(
                "No data",
                (center.0 - 40, center.1),
                ("sans-serif", 24).into_font().color(&BLACK),
            ))
            .map_err(render_err)?;
        } else {
            let radius = f64::from(w.min(h)) * 0.35;
            let sizes: Vec<f64> = slices.iter().map(|(_, count)| *count as f64).collect();
            let colors: Vec<RGBColor> = (0..slices.len()).map(color_for).collect();
            let labels: Vec<String> = slices.iter().map(|(name, _)| name.clone()).collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style(("sans-serif", 20).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
            root.draw(&pie).map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }

    rgb_buffer_to_png(style.width, style.height, buf)
}
