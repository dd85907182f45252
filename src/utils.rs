use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

/// Index of the first maximal value; 0 for an empty iterator.
pub fn argmax<T: PartialOrd>(values: impl IntoIterator<Item = T>) -> usize {
    let mut best: Option<T> = None;
    let mut result: usize = 0;
    for (i, v) in values.into_iter().enumerate() {
        let better = match &best {
            None => true,
            Some(max) => *max < v,
        };
        if better {
            best = Some(v);
            result = i;
        }
    }
    result
}

pub fn moving_average(window: usize, vector: &[f32]) -> Vec<f32> {
    let window = window.max(1);
    vector
        .chunks(window)
        .map(|chunk| chunk.iter().sum::<f32>() / chunk.len() as f32)
        .collect()
}

/// Draws one line per series into a PNG at `path`.
pub fn plot_moving_average(
    path: &Path,
    values: &[Vec<f32>],
    colors: &[RGBColor],
) -> Result<(), Box<dyn Error>> {
    let longest = values.iter().map(Vec::len).max().unwrap_or(0).max(2);
    let (mut min, mut max) = values
        .iter()
        .flatten()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if !min.is_finite() || !max.is_finite() {
        (min, max) = (0.0, 1.0);
    }
    if (max - min).abs() < f32::EPSILON {
        max = min + 1.0;
    }

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0f32..(longest - 1) as f32, min..max)?;
    for (series, color) in values.iter().zip(colors.iter().cycle()) {
        chart.draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, v)| (i as f32, *v)),
            color,
        ))?;
    }
    root.present()?;
    Ok(())
}
