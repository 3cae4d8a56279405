//! Owner of the single live risk-visualization instance. The chart is fully
//! replaced on every update: any existing instance is released before a new
//! one is created, so underlying canvas resources are never leaked.

use api::RiskLevel;

/// Canvas element the bar chart binds to. Views without it (the clinician
/// dashboard) simply never get a chart.
pub const CHART_CANVAS_ID: &str = "risk-chart";

/// Score ceiling used to scale the bar. Scores above this render full-height.
#[cfg(target_arch = "wasm32")]
const SCORE_SCALE_MAX: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Normal,
    Caution,
    HighAlert,
}

impl BarColor {
    pub fn css(self) -> &'static str {
        match self {
            BarColor::Normal => "#3f9c5a",
            BarColor::Caution => "#e8a33d",
            BarColor::HighAlert => "#d64545",
        }
    }
}

/// Bar color as a pure function of the score. Boundary values belong to the
/// higher band.
pub fn color_for_score(score: f64) -> BarColor {
    if score >= 20.0 {
        BarColor::HighAlert
    } else if score >= 10.0 {
        BarColor::Caution
    } else {
        BarColor::Normal
    }
}

/// Styling class for the textual risk badge next to the chart.
pub fn risk_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "low-risk",
        RiskLevel::Moderate => "moderate-risk",
        RiskLevel::High => "high-risk",
    }
}

/// At most one [`RiskChart`] exists at any time; this controller is the only
/// place instances are created or torn down.
#[derive(Debug, Default)]
pub struct ChartController {
    current: Option<RiskChart>,
}

impl ChartController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the owned instance with one drawn for `score`. A missing
    /// rendering surface leaves the controller empty without erroring.
    pub fn update(&mut self, score: f64) {
        if let Some(previous) = self.current.take() {
            previous.release();
        }
        self.current = RiskChart::create(score);
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }
}

/// One drawn bar chart. Creation draws; [`RiskChart::release`] clears the
/// surface and consumes the handle.
#[derive(Debug)]
struct RiskChart {
    #[cfg(target_arch = "wasm32")]
    canvas: web_sys::HtmlCanvasElement,
    #[cfg(target_arch = "wasm32")]
    ctx: web_sys::CanvasRenderingContext2d,
    #[cfg(not(target_arch = "wasm32"))]
    score: f64,
}

#[cfg(target_arch = "wasm32")]
impl RiskChart {
    fn create(score: f64) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let canvas = document
            .get_element_by_id(CHART_CANVAS_ID)?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .ok()?;

        let chart = Self { canvas, ctx };
        chart.draw(score);
        Some(chart)
    }

    fn draw(&self, score: f64) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());

        self.ctx.set_fill_style_str("#f7f5f0");
        self.ctx.fill_rect(0.0, 0.0, width, height);

        // Baseline.
        self.ctx.set_fill_style_str("#2b2b2b");
        self.ctx.fill_rect(0.0, height - 2.0, width, 2.0);

        let fraction = (score / SCORE_SCALE_MAX).clamp(0.0, 1.0);
        let bar_height = (height - 24.0) * fraction;
        let bar_width = width * 0.4;
        let x = (width - bar_width) / 2.0;

        self.ctx.set_fill_style_str(color_for_score(score).css());
        self.ctx
            .fill_rect(x, height - 2.0 - bar_height, bar_width, bar_height);

        self.ctx.set_fill_style_str("#2b2b2b");
        self.ctx.set_font("14px sans-serif");
        let _ = self
            .ctx
            .fill_text(&format!("Risk score: {score:.0}"), 8.0, 16.0);
    }

    fn release(self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RiskChart {
    // Headless stand-in so controller semantics stay testable off-web.
    fn create(score: f64) -> Option<Self> {
        Some(Self { score })
    }

    fn release(self) {
        let _ = self.score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_band_below_ten() {
        assert_eq!(color_for_score(0.0), BarColor::Normal);
        assert_eq!(color_for_score(9.9), BarColor::Normal);
    }

    #[test]
    fn caution_band_is_inclusive_at_ten() {
        assert_eq!(color_for_score(10.0), BarColor::Caution);
        assert_eq!(color_for_score(19.9), BarColor::Caution);
    }

    #[test]
    fn high_alert_is_inclusive_at_twenty() {
        assert_eq!(color_for_score(20.0), BarColor::HighAlert);
        assert_eq!(color_for_score(25.0), BarColor::HighAlert);
    }

    #[test]
    fn update_twice_leaves_exactly_one_instance() {
        let mut controller = ChartController::new();
        assert!(!controller.is_live());

        controller.update(5.0);
        assert!(controller.is_live());

        controller.update(22.0);
        assert!(controller.is_live());
    }

    #[test]
    fn risk_classes_cover_all_levels() {
        assert_eq!(risk_class(api::RiskLevel::Low), "low-risk");
        assert_eq!(risk_class(api::RiskLevel::Moderate), "moderate-risk");
        assert_eq!(risk_class(api::RiskLevel::High), "high-risk");
    }
}
