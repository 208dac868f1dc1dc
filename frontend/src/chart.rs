//! Inline SVG line chart for the timeline projection.

use leptos::prelude::*;
use pandemic_types::TimelinePoint;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 360.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 44.0;
const TICKS: usize = 5;

/// Maps years and death tolls onto the SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    min_year: i32,
    max_year: i32,
    max_deaths: f64,
}

impl ChartGeometry {
    pub fn fit(points: &[TimelinePoint]) -> Self {
        let min_year = points.iter().map(|p| p.year).min().unwrap_or(0);
        let max_year = points.iter().map(|p| p.year).max().unwrap_or(0);
        let max_deaths = points
            .iter()
            .map(|p| p.deaths_millions)
            .fold(0.0_f64, f64::max);
        Self {
            min_year,
            max_year,
            max_deaths,
        }
    }

    pub fn x(&self, year: i32) -> f64 {
        let inner = WIDTH - PAD_LEFT - PAD_RIGHT;
        if self.max_year == self.min_year {
            return PAD_LEFT + inner / 2.0;
        }
        let t = f64::from(year - self.min_year) / f64::from(self.max_year - self.min_year);
        PAD_LEFT + t * inner
    }

    pub fn y(&self, deaths_millions: f64) -> f64 {
        let baseline = HEIGHT - PAD_BOTTOM;
        if self.max_deaths <= 0.0 {
            return baseline;
        }
        let inner = HEIGHT - PAD_TOP - PAD_BOTTOM;
        baseline - (deaths_millions / self.max_deaths) * inner
    }

    /// `points` attribute for an SVG polyline, in input order.
    pub fn polyline(&self, points: &[TimelinePoint]) -> String {
        points
            .iter()
            .map(|p| format!("{:.1},{:.1}", self.x(p.year), self.y(p.deaths_millions)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Evenly spaced death values from zero to the maximum, inclusive.
    pub fn death_ticks(&self) -> Vec<f64> {
        (0..TICKS)
            .map(|i| self.max_deaths * i as f64 / (TICKS - 1) as f64)
            .collect()
    }

    /// Evenly spaced years from the first to the last, inclusive.
    pub fn year_ticks(&self) -> Vec<i32> {
        let span = self.max_year - self.min_year;
        if span == 0 {
            return vec![self.min_year];
        }
        (0..TICKS)
            .map(|i| self.min_year + span * i as i32 / (TICKS - 1) as i32)
            .collect()
    }
}

#[component]
pub fn TimelineChart(points: Vec<TimelinePoint>) -> impl IntoView {
    let geometry = ChartGeometry::fit(&points);
    let hovered = RwSignal::new(None::<usize>);

    let grid = geometry
        .death_ticks()
        .into_iter()
        .map(|d| {
            let y = format!("{:.1}", geometry.y(d));
            view! {
                <line class="grid" x1=PAD_LEFT.to_string() x2=(WIDTH - PAD_RIGHT).to_string()
                    y1=y.clone() y2=y.clone() stroke-dasharray="3 3"/>
                <text class="tick" x=(PAD_LEFT - 8.0).to_string() y=y text-anchor="end">
                    {format!("{d:.0}")}
                </text>
            }
        })
        .collect_view();

    let years = geometry
        .year_ticks()
        .into_iter()
        .map(|year| {
            view! {
                <text class="tick" x=format!("{:.1}", geometry.x(year))
                    y=(HEIGHT - PAD_BOTTOM + 18.0).to_string() text-anchor="middle">
                    {year}
                </text>
            }
        })
        .collect_view();

    let dots = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            view! {
                <circle
                    class="chart-dot"
                    tabindex="0"
                    cx=format!("{:.1}", geometry.x(p.year))
                    cy=format!("{:.1}", geometry.y(p.deaths_millions))
                    r=move || if hovered.get() == Some(i) { "8" } else { "6" }
                    on:mouseenter=move |_| hovered.set(Some(i))
                    on:mouseleave=move |_| hovered.set(None)
                    on:focus=move |_| hovered.set(Some(i))
                    on:blur=move |_| hovered.set(None)
                />
            }
        })
        .collect_view();

    let line = geometry.polyline(&points);

    let tooltip = move || {
        let p = points.get(hovered.get()?)?;
        let [name, year, deaths] = p.tooltip();
        let left = geometry.x(p.year) / WIDTH * 100.0;
        let top = geometry.y(p.deaths_millions) / HEIGHT * 100.0;
        Some(view! {
            <div class="chart-tooltip" style=format!("left:{left:.1}%;top:{top:.1}%")>
                <p class="tooltip-name">{name}</p>
                <p class="muted">{year}</p>
                <p class="deaths">{deaths}</p>
            </div>
        })
    };

    view! {
        <div class="chart">
            <svg viewBox=format!("0 0 {WIDTH} {HEIGHT}") preserveAspectRatio="none">
                {grid}
                {years}
                <text class="axis-label" x=(WIDTH / 2.0).to_string() y=(HEIGHT - 4.0).to_string()
                    text-anchor="middle">"Год"</text>
                <text class="axis-label" x="14" y=(HEIGHT / 2.0).to_string() text-anchor="middle"
                    transform=format!("rotate(-90 14 {})", HEIGHT / 2.0)>"Жертвы (млн)"</text>
                <polyline class="chart-line" points=line fill="none" stroke-width="3"/>
                {dots}
            </svg>
            {tooltip}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, deaths_millions: f64) -> TimelinePoint {
        TimelinePoint {
            year,
            deaths_millions,
            name: format!("p{year}"),
        }
    }

    #[test]
    fn test_x_spans_inner_width() {
        let g = ChartGeometry::fit(&[point(100, 1.0), point(200, 2.0)]);
        assert_eq!(g.x(100), PAD_LEFT);
        assert_eq!(g.x(200), WIDTH - PAD_RIGHT);
        assert_eq!(g.x(150), PAD_LEFT + (WIDTH - PAD_LEFT - PAD_RIGHT) / 2.0);
    }

    #[test]
    fn test_y_top_is_max() {
        let g = ChartGeometry::fit(&[point(100, 0.0), point(200, 4.0)]);
        assert_eq!(g.y(4.0), PAD_TOP);
        assert_eq!(g.y(0.0), HEIGHT - PAD_BOTTOM);
    }

    #[test]
    fn test_degenerate_inputs() {
        // Single point: centred horizontally
        let g = ChartGeometry::fit(&[point(1918, 50.0)]);
        assert_eq!(g.x(1918), PAD_LEFT + (WIDTH - PAD_LEFT - PAD_RIGHT) / 2.0);
        assert_eq!(g.year_ticks(), vec![1918]);

        // Empty or all-zero tolls: everything on the baseline
        let g = ChartGeometry::fit(&[]);
        assert_eq!(g.y(0.0), HEIGHT - PAD_BOTTOM);
        let g = ChartGeometry::fit(&[point(1, 0.0), point(2, 0.0)]);
        assert_eq!(g.y(0.0), HEIGHT - PAD_BOTTOM);
        assert!(g.death_ticks().iter().all(|t| *t == 0.0));
    }

    #[test]
    fn test_ticks() {
        let g = ChartGeometry::fit(&[point(0, 0.0), point(2000, 80.0)]);
        assert_eq!(g.year_ticks(), vec![0, 500, 1000, 1500, 2000]);
        assert_eq!(g.death_ticks(), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn test_polyline_keeps_order() {
        let g = ChartGeometry::fit(&[point(0, 0.0), point(100, 10.0)]);
        let line = g.polyline(&[point(0, 0.0), point(100, 10.0)]);
        assert_eq!(line, "56.0,316.0 784.0,16.0");
    }
}
