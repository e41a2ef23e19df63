//! Render options and their translation to Chrome DevTools print parameters.
//!
//! Callers speak the puppeteer-style option surface (paper format names,
//! CSS length strings for margins); the DevTools `Page.printToPDF` command
//! wants paper size and margins in inches. The translation happens at
//! invocation time, so a bad format or margin string surfaces as a render
//! failure rather than a request-validation failure.
//!
//! Unknown option keys are ignored: the option surface is a fixed allow-list
//! so callers cannot override internal fields such as timeouts.

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use serde::Deserialize;

/// Caller-supplied rendering options with service defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Paper format name (A0-A6, Letter, Legal, Tabloid, Ledger).
    pub format: String,
    pub print_background: bool,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
    pub landscape: bool,
    pub scale: f64,
    pub display_header_footer: bool,
    pub header_template: Option<String>,
    pub footer_template: Option<String>,
    pub page_ranges: Option<String>,
    pub prefer_css_page_size: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: "A4".to_string(),
            print_background: true,
            margin_top: "1cm".to_string(),
            margin_right: "1cm".to_string(),
            margin_bottom: "1cm".to_string(),
            margin_left: "1cm".to_string(),
            landscape: false,
            scale: 1.0,
            display_header_footer: false,
            header_template: None,
            footer_template: None,
            page_ranges: None,
            prefer_css_page_size: false,
        }
    }
}

impl RenderOptions {
    /// Builds the DevTools print parameters, translating format names and
    /// margin length strings into inches.
    ///
    /// Value-range enforcement (e.g. scale within [0.1, 2]) is left to the
    /// browser, which rejects out-of-range parameters at print time.
    pub fn to_pdf_params(&self) -> Result<PrintToPdfParams, String> {
        let (paper_width, paper_height) = paper_size(&self.format)?;

        Ok(PrintToPdfParams {
            landscape: Some(self.landscape),
            display_header_footer: Some(self.display_header_footer),
            print_background: Some(self.print_background),
            scale: Some(self.scale),
            paper_width: Some(paper_width),
            paper_height: Some(paper_height),
            margin_top: Some(parse_length(&self.margin_top)?),
            margin_bottom: Some(parse_length(&self.margin_bottom)?),
            margin_left: Some(parse_length(&self.margin_left)?),
            margin_right: Some(parse_length(&self.margin_right)?),
            header_template: self.header_template.clone(),
            footer_template: self.footer_template.clone(),
            page_ranges: self.page_ranges.clone(),
            prefer_css_page_size: Some(self.prefer_css_page_size),
            ..Default::default()
        })
    }
}

/// Paper dimensions in inches for a format name, case-insensitive.
fn paper_size(format: &str) -> Result<(f64, f64), String> {
    let size = match format.to_ascii_lowercase().as_str() {
        "letter" => (8.5, 11.0),
        "legal" => (8.5, 14.0),
        "tabloid" => (11.0, 17.0),
        "ledger" => (17.0, 11.0),
        "a0" => (33.1, 46.8),
        "a1" => (23.4, 33.1),
        "a2" => (16.54, 23.4),
        "a3" => (11.7, 16.54),
        "a4" => (8.27, 11.7),
        "a5" => (5.83, 8.27),
        "a6" => (4.13, 5.83),
        other => return Err(format!("Unknown paper format: {other:?}")),
    };
    Ok(size)
}

/// Parses a CSS-style length string ("1cm", "10mm", "0.5in", "96px" or a
/// bare pixel number) into inches.
fn parse_length(value: &str) -> Result<f64, String> {
    let value = value.trim();
    let (number, per_inch) = if let Some(v) = value.strip_suffix("px") {
        (v, 96.0)
    } else if let Some(v) = value.strip_suffix("in") {
        (v, 1.0)
    } else if let Some(v) = value.strip_suffix("cm") {
        (v, 2.54)
    } else if let Some(v) = value.strip_suffix("mm") {
        (v, 25.4)
    } else {
        (value, 96.0)
    };

    let number: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("Invalid length value: {value:?}"))?;
    if number < 0.0 {
        return Err(format!("Negative length value: {value:?}"));
    }
    Ok(number / per_inch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_expected() {
        let opts = RenderOptions::default();
        assert_eq!(opts.format, "A4");
        assert!(opts.print_background);
        assert_eq!(opts.margin_top, "1cm");
        assert_eq!(opts.margin_right, "1cm");
        assert_eq!(opts.margin_bottom, "1cm");
        assert_eq!(opts.margin_left, "1cm");
        assert!(!opts.landscape);
        assert!((opts.scale - 1.0).abs() < f64::EPSILON);
        assert!(!opts.display_header_footer);
        assert!(opts.header_template.is_none());
        assert!(opts.footer_template.is_none());
        assert!(opts.page_ranges.is_none());
        assert!(!opts.prefer_css_page_size);
    }

    #[test]
    fn defaults_translate_to_a4_with_1cm_margins() {
        let params = RenderOptions::default().to_pdf_params().unwrap();
        assert!((params.paper_width.unwrap() - 8.27).abs() < 1e-9);
        assert!((params.paper_height.unwrap() - 11.7).abs() < 1e-9);
        let margin = params.margin_top.unwrap();
        assert!((margin - 1.0 / 2.54).abs() < 1e-9);
        assert_eq!(params.print_background, Some(true));
        assert_eq!(params.landscape, Some(false));
    }

    #[test]
    fn paper_formats_are_case_insensitive() {
        assert_eq!(paper_size("letter").unwrap(), (8.5, 11.0));
        assert_eq!(paper_size("LETTER").unwrap(), (8.5, 11.0));
        assert_eq!(paper_size("a3").unwrap(), (11.7, 16.54));
        assert_eq!(paper_size("A3").unwrap(), (11.7, 16.54));
    }

    #[test]
    fn unknown_paper_format_is_a_translation_error() {
        let opts = RenderOptions {
            format: "A9".to_string(),
            ..RenderOptions::default()
        };
        let err = opts.to_pdf_params().unwrap_err();
        assert!(err.contains("A9"), "got: {err}");
    }

    #[test]
    fn lengths_parse_in_all_supported_units() {
        assert!((parse_length("1in").unwrap() - 1.0).abs() < 1e-9);
        assert!((parse_length("2.54cm").unwrap() - 1.0).abs() < 1e-9);
        assert!((parse_length("25.4mm").unwrap() - 1.0).abs() < 1e-9);
        assert!((parse_length("96px").unwrap() - 1.0).abs() < 1e-9);
        // Bare numbers are pixels, as in CSS-less puppeteer margins.
        assert!((parse_length("48").unwrap() - 0.5).abs() < 1e-9);
        assert!((parse_length(" 1 cm ").unwrap() - 1.0 / 2.54).abs() < 1e-9);
    }

    #[test]
    fn bad_lengths_are_translation_errors() {
        assert!(parse_length("wide").is_err());
        assert!(parse_length("-1cm").is_err());
        assert!(parse_length("").is_err());
    }

    #[test]
    fn caller_overrides_pass_through_to_params() {
        let opts: RenderOptions = serde_json::from_str(
            r#"{
                "format": "Letter",
                "landscape": true,
                "scale": 0.8,
                "displayHeaderFooter": true,
                "headerTemplate": "<span class=\"title\"></span>",
                "pageRanges": "1-3"
            }"#,
        )
        .unwrap();
        let params = opts.to_pdf_params().unwrap();
        assert_eq!(params.paper_width, Some(8.5));
        assert_eq!(params.landscape, Some(true));
        assert!((params.scale.unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(params.display_header_footer, Some(true));
        assert_eq!(params.page_ranges.as_deref(), Some("1-3"));
        assert!(params.header_template.is_some());
    }

    #[test]
    fn unknown_option_keys_are_ignored() {
        // The allow-list keeps callers away from internal fields like timeouts.
        let opts: RenderOptions =
            serde_json::from_str(r#"{"format": "A5", "navigationTimeoutMs": 1, "timeout": 1}"#)
                .unwrap();
        assert_eq!(opts.format, "A5");
        assert_eq!(
            opts,
            RenderOptions {
                format: "A5".to_string(),
                ..RenderOptions::default()
            }
        );
    }
}
