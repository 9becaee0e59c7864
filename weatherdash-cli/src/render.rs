//! Text rendering of the dashboard panels.

use std::fmt::Write as _;

use weatherdash_core::{
    Dashboard, Palette, Rgb, StatusKind, TrendChart, Units,
    model::{icon_glyph, title_case},
};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    units: Units,
    color: bool,
}

impl Renderer {
    pub fn new(units: Units, color: bool) -> Self {
        Self { units, color }
    }

    pub fn render(&self, dash: &Dashboard, favorites: &[String]) -> String {
        let palette = dash.theme().palette();
        let mut out = String::new();

        let status_color = match dash.status().kind {
            StatusKind::Info => palette.success,
            StatusKind::Error => palette.danger,
        };
        let _ = writeln!(out, "{}", self.paint(&dash.status().message, status_color));

        if dash.panels_visible() {
            self.current_panel(&mut out, dash, &palette);
            self.forecast_panel(&mut out, dash, &palette);
            if let Some(chart) = dash.chart() {
                self.chart_panel(&mut out, chart);
            }
        }

        self.favorites_panel(&mut out, favorites, &palette);
        out
    }

    fn heading(&self, out: &mut String, title: &str, palette: &Palette) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.paint(title, palette.accent));
    }

    fn current_panel(&self, out: &mut String, dash: &Dashboard, palette: &Palette) {
        let Some(current) = dash.current() else {
            return;
        };
        let temp = self.units.temperature_suffix();

        self.heading(out, &format!("{}, {}", current.city, current.country), palette);
        let _ = writeln!(out, "{} {}", icon_glyph(&current.icon), title_case(&current.description));
        let rows = [
            ("Temperature", format!("{}{temp}", current.temperature.round() as i64)),
            ("Feels like", format!("{}{temp}", current.feels_like.round() as i64)),
            ("Humidity", format!("{}%", current.humidity_pct)),
            ("Wind", format!("{} {}", current.wind_speed, self.units.speed_suffix())),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "  {} {value}", self.paint(&format!("{label:<12}"), palette.text));
        }
    }

    fn forecast_panel(&self, out: &mut String, dash: &Dashboard, palette: &Palette) {
        self.heading(out, "5-Day Forecast", palette);
        for day in dash.days() {
            let label = day.date.format("%a, %b %-d").to_string();
            let _ = writeln!(
                out,
                "  {} {}  {:>3}° / {:>3}°",
                self.paint(&format!("{label:<12}"), palette.text),
                icon_glyph(&day.icon),
                day.min_temp.round() as i64,
                day.max_temp.round() as i64,
            );
        }
    }

    /// Horizontal bars scaled between the lowest and highest daily mean.
    fn chart_panel(&self, out: &mut String, chart: &TrendChart) {
        let palette = chart.palette;
        self.heading(out, &format!("Temp ({})", self.units.temperature_suffix()), &palette);

        let lo = chart.data.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = chart.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        for (label, value) in chart.labels.iter().zip(&chart.data) {
            let len = bar_len(*value, lo, hi);
            let bar = "█".repeat(len);
            let rest = "·".repeat(BAR_WIDTH - len);
            let _ = writeln!(
                out,
                "  {} {}{}{} {:.1}",
                self.paint(&format!("{label:<7}"), palette.text),
                self.paint("│", palette.grid),
                self.paint(&bar, palette.accent),
                self.paint(&rest, palette.accent_bg),
                value,
            );
        }
    }

    fn favorites_panel(&self, out: &mut String, favorites: &[String], palette: &Palette) {
        self.heading(out, "Favorites", palette);
        if favorites.is_empty() {
            let _ = writeln!(out, "  {}", self.paint("No saved cities", palette.text));
            return;
        }
        for city in favorites {
            let _ = writeln!(out, "  ★ {city}");
        }
    }

    fn paint(&self, text: &str, Rgb(r, g, b): Rgb) -> String {
        if self.color {
            format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn bar_len(value: f64, lo: f64, hi: f64) -> usize {
    if !(hi - lo).is_finite() || hi <= lo {
        return BAR_WIDTH / 2;
    }
    let ratio = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    1 + (ratio * (BAR_WIDTH - 1) as f64).round() as usize
}
