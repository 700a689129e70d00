//! Parsing functions for command-line values.

use cubemapper_core::SampleMode;

/// Parse a sampling mode name
///
/// # Arguments
/// * `mode_str` - "color" or "normal_map"
pub fn parse_sample_mode(mode_str: &str) -> Result<SampleMode, String> {
    match mode_str.to_lowercase().as_str() {
        "color" => Ok(SampleMode::Color),
        "normal_map" => Ok(SampleMode::NormalMap),
        other => Err(format!(
            "Unknown mode '{}', expected 'color' or 'normal_map'",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_sample_mode("color").unwrap(), SampleMode::Color);
        assert_eq!(parse_sample_mode("COLOR").unwrap(), SampleMode::Color);
    }

    #[test]
    fn test_parse_normal_map() {
        assert_eq!(
            parse_sample_mode("normal_map").unwrap(),
            SampleMode::NormalMap
        );
    }

    #[test]
    fn test_parse_unknown_mode() {
        let result = parse_sample_mode("irradiance");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown mode"));
    }
}
