//! Label measurement, truncation, wrapping and number formatting.
//!
//! The engine never sees real fonts, so widths are estimated from character counts.

use num_format::{Locale, ToFormattedString};

/// Heuristic: estimate the rendered width of `text` at `font_px`.
pub fn estimate_text_width(text: &str, font_px: f64) -> f64 {
    (text.chars().count() as f64 * font_px * 0.60).ceil()
}

/// Truncate to fit `max_w` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: f64, max_w: f64) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{out}{ch}");
        if estimate_text_width(&next, font_px) > max_w {
            if !out.is_empty() {
                if estimate_text_width(&(out.clone() + "…"), font_px) <= max_w {
                    out.push('…');
                } else if out.chars().count() > 1 {
                    out.pop();
                    out.push('…');
                }
            }
            return out;
        }
        out = next;
    }
    out
}

/// Wrap on word boundaries to at most `max_lines` lines of width `max_w`;
/// the last kept line is truncated with an ellipsis when text remains.
pub fn wrap_to_width(text: &str, font_px: f64, max_w: f64, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width(&candidate, font_px) <= max_w || cur.is_empty() {
            cur = candidate;
        } else {
            lines.push(std::mem::take(&mut cur));
            cur = word.to_string();
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    let limit = max_lines.max(1);
    if lines.len() > limit {
        let rest = lines.split_off(limit - 1).join(" ");
        lines.push(rest);
    }
    lines
        .into_iter()
        .map(|l| truncate_to_width(&l, font_px, max_w))
        .collect()
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format a value label with locale thousands separators.
///
/// Magnitudes of 100 and above print as whole numbers; smaller values keep
/// one or two decimals, like axis tick labels.
pub fn format_value(v: f64, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let a = v.abs();
    let prec: usize = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    // `as u64` saturates, so huge magnitudes cannot overflow
    let scaled = (a * 10f64.powi(prec as i32)).round() as u64;
    let pow = 10u64.pow(prec as u32);
    let sign = if v < 0.0 && scaled > 0 { "-" } else { "" };
    let mut s = format!("{sign}{}", (scaled / pow).to_formatted_string(locale));
    if prec > 0 {
        let frac = format!("{:0width$}", scaled % pow, width = prec);
        let frac = frac.trim_end_matches('0');
        if !frac.is_empty() {
            s.push(dec_sep);
            s.push_str(frac);
        }
    }
    s
}

/// Percentage label with one decimal only when needed: `40%`, `12.5%`.
pub fn format_percent(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if (pct - pct.round()).abs() < 0.05 {
        format!("{:.0}%", pct.round())
    } else {
        format!("{pct:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_adds_ellipsis() {
        let t = truncate_to_width("Chief Technology Officer", 10.0, 60.0);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width(&t, 10.0) <= 60.0);
    }

    #[test]
    fn values_use_locale_separators() {
        assert_eq!(format_value(1234567.0, "en"), "1,234,567");
        assert_eq!(format_value(1234567.0, "de"), "1.234.567");
        assert_eq!(format_value(12.5, "de"), "12,5");
        assert_eq!(format_value(-3.25, "en"), "-3.25");
        assert_eq!(format_value(40.0, "en"), "40");
    }

    #[test]
    fn huge_magnitudes_do_not_overflow() {
        assert!(format_value(-1e19, "en").starts_with('-'));
        assert!(!format_value(1e300, "en").is_empty());
        assert_eq!(format_value(-0.001, "en"), "0");
    }

    #[test]
    fn wrap_limits_line_count() {
        let lines = wrap_to_width("one two three four five six", 10.0, 60.0, 2);
        assert_eq!(lines.len(), 2);
    }
}
