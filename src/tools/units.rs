//! Unit conversion MCP Tools

use serde::Serialize;

use crate::convert::{ConversionService, UnitCategory};

/// Response for convert_units
#[derive(Debug, Serialize)]
pub struct ConvertUnitsResponse {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub category: UnitCategory,
    pub result: f64,
}

pub fn convert_units<C: ConversionService + ?Sized>(
    converter: &C,
    value: f64,
    from_unit: &str,
    to_unit: &str,
    category: &str,
) -> Result<ConvertUnitsResponse, String> {
    let category = UnitCategory::from_str(category).ok_or_else(|| {
        format!(
            "Unknown unit category: '{}'. Use temperature, volume, mass or density",
            category
        )
    })?;

    let from = converter.normalise_unit(from_unit, category).map_err(|e| e.to_string())?;
    let to = converter.normalise_unit(to_unit, category).map_err(|e| e.to_string())?;
    let result = converter
        .convert(value, &from, &to, category)
        .map_err(|e| e.to_string())?;

    Ok(ConvertUnitsResponse {
        value,
        from_unit: from,
        to_unit: to,
        category,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StandardConverter;

    #[test]
    fn test_convert_units_normalises_names() {
        let resp = convert_units(&StandardConverter, 2.0, "Litres", "millilitres", "volume").unwrap();
        assert_eq!(resp.from_unit, "l");
        assert_eq!(resp.to_unit, "ml");
        assert!((resp.result - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_units_errors() {
        let err = convert_units(&StandardConverter, 1.0, "g", "l", "length").unwrap_err();
        assert!(err.contains("length"));

        let err = convert_units(&StandardConverter, 1.0, "stone", "g", "mass").unwrap_err();
        assert!(err.contains("stone"));
    }
}
