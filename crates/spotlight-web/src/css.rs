#![forbid(unsafe_code)]

//! CSS value formatting for style commands.

use spotlight_core::{Backdrop, OverlayTransform};

/// Fixed-point with at most four decimals, trailing zeros trimmed.
///
/// `-0` prints as `0`; non-finite values print as `0`.
#[must_use]
pub fn number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{value:.4}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[must_use]
pub fn percent(value: f64) -> String {
    format!("{}%", number(value))
}

#[must_use]
pub fn translate_y_percent(value: f64) -> String {
    format!("translateY({}%)", number(value))
}

#[must_use]
pub fn scale(value: f64) -> String {
    format!("scale({})", number(value))
}

#[must_use]
pub fn opacity(shown: bool) -> String {
    if shown { "1" } else { "0" }.to_string()
}

#[must_use]
pub fn overlay_transform(overlay: OverlayTransform) -> String {
    match overlay {
        OverlayTransform::Reset => "none".to_string(),
        OverlayTransform::TranslateY { viewport_percent } => {
            format!("translateY({}vh)", number(viewport_percent))
        }
    }
}

#[must_use]
pub fn translate_y_px(value: f64) -> String {
    format!("translateY({}px)", number(value))
}

/// `(background, backdrop-filter, box-shadow)` for a nav backdrop.
#[must_use]
pub const fn backdrop(backdrop: Backdrop) -> (&'static str, &'static str, &'static str) {
    match backdrop {
        Backdrop::Transparent => ("transparent", "none", "none"),
        Backdrop::Frosted => (
            "rgba(64, 64, 64, 0.8)",
            "blur(10px)",
            "0 2px 10px rgba(0, 0, 0, 0.1)",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_trim_noise() {
        assert_eq!(number(225.00000000000003), "225");
        assert_eq!(number(1.25), "1.25");
        assert_eq!(number(-142.5), "-142.5");
        assert_eq!(number(-0.0), "0");
        assert_eq!(number(-0.00001), "0");
        assert_eq!(number(f64::NAN), "0");
    }

    #[test]
    fn composite_values() {
        assert_eq!(percent(450.0), "450%");
        assert_eq!(translate_y_percent(-50.0), "translateY(-50%)");
        assert_eq!(scale(1.5), "scale(1.5)");
        assert_eq!(opacity(true), "1");
        assert_eq!(translate_y_px(-72.0), "translateY(-72px)");
    }

    #[test]
    fn overlay_values() {
        assert_eq!(overlay_transform(OverlayTransform::Reset), "none");
        assert_eq!(
            overlay_transform(OverlayTransform::TranslateY {
                viewport_percent: -33.3333333
            }),
            "translateY(-33.3333vh)"
        );
    }
}
