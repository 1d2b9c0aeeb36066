//! # Price Charts
//!
//! Renders settlement-price series as SVG line charts: one line per contract,
//! dates along the x axis, settle price on the y axis.

use analytics::GroupedSeries;
use chrono::NaiveDate;
use configuration::ChartsConfig;
use core_types::PriceObservation;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub mod error;

pub use error::ChartError;

const PADDING: f64 = 60.0;
const Y_TICKS: usize = 5;
const Y_AXIS_LABEL: &str = "Settle price($)";
const PALETTE: [&str; 8] = [
    "#348dc1", "#ff9933", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

/// Pixel size of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
        }
    }
}

impl From<&ChartsConfig> for ChartOptions {
    fn from(config: &ChartsConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }
}

/// Title for a chart of every contract of a root.
pub fn root_chart_title(root: &str) -> String {
    format!("Futures prices of {root} for all contracts")
}

/// Title for a chart of a single contract.
pub fn contract_chart_title(contract_id: &str) -> String {
    format!("Futures prices of {contract_id}")
}

struct Line<'a> {
    label: &'a str,
    color: &'static str,
    points: Vec<(usize, f64)>,
}

/// Renders `prices` as an SVG document.
///
/// Contracts are drawn in the order they first appear. Every distinct date of
/// any contract gets an x position, so contracts with shorter histories line
/// up with the others.
pub fn render_price_chart(
    title: &str,
    prices: &[PriceObservation],
    options: &ChartOptions,
) -> Result<String, ChartError> {
    if prices.is_empty() {
        return Err(ChartError::EmptySeries(title.to_string()));
    }

    let dates: Vec<NaiveDate> = prices
        .iter()
        .map(|obs| obs.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut grouped: GroupedSeries<&str, &PriceObservation> = prices
        .iter()
        .map(|obs| (obs.contract_id.as_str(), obs))
        .collect();
    grouped.sort_groups_by_key(|obs| obs.date);

    let lines: Vec<Line> = grouped
        .groups()
        .enumerate()
        .map(|(i, (contract_id, observations))| Line {
            label: *contract_id,
            color: PALETTE[i % PALETTE.len()],
            points: observations
                .iter()
                .filter_map(|obs| {
                    let idx = dates.binary_search(&obs.date).ok()?;
                    obs.price.to_f64().map(|p| (idx, p))
                })
                .collect(),
        })
        .collect();

    let (min_v, max_v) = extent(&lines);
    let width = f64::from(options.width);
    let height = f64::from(options.height);

    let mut svg = svg_header(options.width, options.height);
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="16" fill="#333">{title}</text>"##,
        x = width / 2.0,
        y = PADDING / 2.0,
        title = escape(title)
    ));

    add_value_axis(&mut svg, min_v, max_v, width, height);
    add_time_axis(&mut svg, &dates, width, height);

    for line in &lines {
        if line.points.is_empty() {
            continue;
        }
        let points_attr = line
            .points
            .iter()
            .map(|(idx, value)| {
                let x = x_position(*idx, dates.len(), width);
                let y = scale_value(*value, min_v, max_v, height);
                format!("{x:.2},{y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.2" points="{points}" />"#,
            color = line.color,
            points = points_attr
        ));
    }

    draw_legend(&mut svg, &lines);
    svg.push_str("</svg>\n");

    tracing::debug!(title, contracts = lines.len(), dates = dates.len(), "Rendered price chart.");
    Ok(svg)
}

/// Renders the chart and writes it to `path`, creating parent directories.
pub fn save_price_chart(
    path: impl AsRef<Path>,
    title: &str,
    prices: &[PriceObservation],
    options: &ChartOptions,
) -> Result<(), ChartError> {
    let svg = render_price_chart(title, prices, options)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, svg)?;
    tracing::info!(path = %path.display(), "Saved price chart.");
    Ok(())
}

fn svg_header(width: u32, height: u32) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:#666}}</style><rect width="100%" height="100%" fill="#eaeaf2" />"##,
        w = width,
        h = height
    )
}

fn extent(lines: &[Line]) -> (f64, f64) {
    let (mut min_v, mut max_v) = lines
        .iter()
        .flat_map(|line| line.points.iter().map(|(_, v)| *v))
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !min_v.is_finite() || !max_v.is_finite() {
        return (0.0, 1.0);
    }
    if min_v == max_v {
        // widen flat ranges
        let adjust = if min_v == 0.0 { 1.0 } else { min_v.abs() * 0.1 };
        min_v -= adjust;
        max_v += adjust;
    }
    (min_v, max_v)
}

fn x_position(idx: usize, count: usize, width: f64) -> f64 {
    if count <= 1 {
        return width / 2.0;
    }
    PADDING + (idx as f64 / (count - 1) as f64) * (width - 2.0 * PADDING)
}

fn scale_value(value: f64, min_v: f64, max_v: f64, height: f64) -> f64 {
    let inner_height = height - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

fn add_value_axis(svg: &mut String, min_v: f64, max_v: f64, width: f64, height: f64) {
    for i in 0..Y_TICKS {
        let value = min_v + (max_v - min_v) * i as f64 / (Y_TICKS - 1) as f64;
        let y = scale_value(value, min_v, max_v, height);
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#ffffff" stroke-width="1" />"##,
            x1 = PADDING,
            x2 = width - PADDING,
            y = y
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{value:.2}</text>"#,
            x = PADDING - 6.0,
            y = y + 4.0,
            value = value
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">{label}</text>"#,
        x = PADDING / 4.0,
        y = height / 2.0,
        label = escape(Y_AXIS_LABEL)
    ));
}

fn add_time_axis(svg: &mut String, dates: &[NaiveDate], width: f64, height: f64) {
    let Some(last) = dates.len().checked_sub(1) else {
        return;
    };
    let mut ticks = vec![0, last / 2, last];
    ticks.dedup();
    for idx in ticks {
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{date}</text>"#,
            x = x_position(idx, dates.len(), width),
            y = height - PADDING + 18.0,
            date = dates[idx].format("%Y-%m-%d")
        ));
    }
}

fn draw_legend(svg: &mut String, lines: &[Line]) {
    let x = PADDING + 10.0;
    let mut y = PADDING + 14.0;
    for line in lines {
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="2" />"#,
            x1 = x,
            x2 = x + 20.0,
            y = y - 4.0,
            color = line.color
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            x = x + 26.0,
            y = y,
            label = escape(line.label)
        ));
        y += 16.0;
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
