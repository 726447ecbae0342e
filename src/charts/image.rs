use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICKS: usize = 5;
const BAR_COLOR: &str = "skyblue";

/// Server-rendered bar chart of total allow-listed quantity per lab, embedded
/// in pages as a `data:` URI.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBarChart {
    svg: String,
}

impl StaticBarChart {
    /// `None` when `totals` is empty.
    pub fn render(title: &str, totals: &[(i32, Decimal)]) -> Option<Self> {
        if totals.is_empty() {
            return None;
        }

        let values: Vec<f64> = totals
            .iter()
            .map(|(_, total)| total.to_f64().unwrap_or_default())
            .collect();
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        let scale_max = if max > 0.0 { max } else { 1.0 };

        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let slot = plot_width / totals.len() as f64;
        let bar_width = slot * 0.5;
        let baseline = MARGIN_TOP + plot_height;

        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
        );
        let _ = write!(svg, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#);
        let _ = write!(
            svg,
            r#"<text x="{}" y="30" font-size="20" text-anchor="middle">{}</text>"#,
            WIDTH / 2.0,
            escape(title)
        );

        for tick in 0..=TICKS {
            let value = scale_max * tick as f64 / TICKS as f64;
            let y = baseline - plot_height * tick as f64 / TICKS as f64;
            let _ = write!(
                svg,
                r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="#dddddd"/><text x="{}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"##,
                WIDTH - MARGIN_RIGHT,
                MARGIN_LEFT - 8.0,
                y + 4.0,
                format_tick(value)
            );
        }

        for (index, ((lab, _), value)) in totals.iter().zip(&values).enumerate() {
            let height = plot_height * value / scale_max;
            let x = MARGIN_LEFT + slot * index as f64 + (slot - bar_width) / 2.0;
            let _ = write!(
                svg,
                r#"<rect x="{x:.1}" y="{:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{BAR_COLOR}"/><text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{lab}</text>"#,
                baseline - height,
                x + bar_width / 2.0,
                baseline + 20.0
            );
        }

        let _ = write!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="black"/><text x="{}" y="{}" font-size="14" text-anchor="middle">Lab</text><text x="20" y="{}" font-size="14" text-anchor="middle" transform="rotate(-90 20 {})">Total Number of Items</text></svg>"#,
            WIDTH - MARGIN_RIGHT,
            MARGIN_LEFT + plot_width / 2.0,
            HEIGHT - 20.0,
            MARGIN_TOP + plot_height / 2.0,
            MARGIN_TOP + plot_height / 2.0
        );

        Some(Self { svg })
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg().as_bytes()))
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
