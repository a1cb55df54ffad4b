//! Raw registry entry form.
//!
//! # Responsibility
//! - Hold the four input boxes exactly as typed.
//! - Turn them into a validated `NewCar` with the dialog-facing error rules.
//!
//! # Invariants
//! - The required-field check runs before any year parsing, so an empty form
//!   always reports "All fields are required!".
//! - Parsing never mutates the form; only `clear()` does.
//! - Year text follows integer-literal rules: optional sign, decimal digits
//!   from any script, single `_` separators between digits.

use crate::model::car::{is_valid_model_year, CarField, CarValidationError, NewCar};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Text currently typed into the registry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarForm {
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: String,
}

impl CarForm {
    pub fn new(
        owner_name: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            make: make.into(),
            model: model.into(),
            year: year.into(),
        }
    }

    /// Raw text of one field.
    pub fn value(&self, field: CarField) -> &str {
        match field {
            CarField::OwnerName => &self.owner_name,
            CarField::Make => &self.make,
            CarField::Model => &self.model,
            CarField::Year => &self.year,
        }
    }

    /// Replaces the raw text of one field.
    pub fn set(&mut self, field: CarField, value: impl Into<String>) {
        let slot = match field {
            CarField::OwnerName => &mut self.owner_name,
            CarField::Make => &mut self.make,
            CarField::Model => &mut self.model,
            CarField::Year => &mut self.year,
        };
        *slot = value.into();
    }

    /// Validates the form and builds the insert payload.
    ///
    /// # Errors
    /// - `MissingField` for the first blank field in form order.
    /// - `InvalidYear` when the year is not an integer.
    /// - `YearOutOfRange` when the year is outside the accepted range.
    pub fn parse(&self) -> Result<NewCar, CarValidationError> {
        if let Some(field) = self.first_blank_field() {
            return Err(CarValidationError::MissingField(field));
        }

        let year_text = self.year.trim();
        let year = parse_year(year_text)
            .ok_or_else(|| CarValidationError::InvalidYear(year_text.to_string()))?;
        if !is_valid_model_year(year) {
            return Err(CarValidationError::YearOutOfRange(year));
        }

        Ok(NewCar::new(&self.owner_name, &self.make, &self.model, year))
    }

    /// Returns the first field (form order) that is empty after trimming.
    pub fn first_blank_field(&self) -> Option<CarField> {
        CarField::ALL
            .into_iter()
            .find(|field| self.value(*field).trim().is_empty())
    }

    /// Whether every field is blank.
    pub fn is_blank(&self) -> bool {
        CarField::ALL
            .iter()
            .all(|field| self.value(*field).trim().is_empty())
    }

    /// Empties all four fields.
    pub fn clear(&mut self) {
        for field in CarField::ALL {
            self.set(field, String::new());
        }
    }
}

/// Parses trimmed year text. Values too large for `i64` saturate so they
/// surface as out-of-range rather than malformed.
fn parse_year(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    let mut after_digit = false;
    let mut chars = digits.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            let before_digit = chars
                .peek()
                .is_some_and(|next| decimal_digit_value(*next).is_some());
            if !after_digit || !before_digit {
                return None;
            }
            after_digit = false;
            continue;
        }
        let digit = decimal_digit_value(c)?;
        value = value.saturating_mul(10).saturating_add(i64::from(digit));
        after_digit = true;
    }

    Some(if negative { -value } else { value })
}

/// Numeric value of a decimal digit (`Nd`) in any script.
///
/// `Nd` code points come in contiguous runs of ten ordered 0..=9, so the value
/// is the offset from the start of the run.
fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(digit) = c.to_digit(10) {
        return Some(digit);
    }
    if get_general_category(c) != GeneralCategory::DecimalNumber {
        return None;
    }

    let mut run_start = u32::from(c);
    while let Some(prev) = run_start.checked_sub(1).and_then(char::from_u32) {
        if get_general_category(prev) != GeneralCategory::DecimalNumber {
            break;
        }
        run_start -= 1;
    }
    Some((u32::from(c) - run_start) % 10)
}

#[cfg(test)]
mod tests {
    use super::CarForm;
    use crate::model::car::{CarField, CarValidationError};

    #[test]
    fn parse_trims_fields_and_reads_year() {
        let form = CarForm::new(" Grace Hopper ", " Ford ", "Mustang\n", " 1967 ");
        let car = form.parse().unwrap();
        assert_eq!(car.owner_name, "Grace Hopper");
        assert_eq!(car.make, "Ford");
        assert_eq!(car.model, "Mustang");
        assert_eq!(car.year, 1967);
    }

    #[test]
    fn parse_accepts_explicit_plus_sign() {
        let car = CarForm::new("Ada", "Fiat", "500", "+1957").parse().unwrap();
        assert_eq!(car.year, 1957);
    }

    #[test]
    fn parse_accepts_underscore_separators_between_digits() {
        let car = CarForm::new("Ada", "Fiat", "500", "1_999").parse().unwrap();
        assert_eq!(car.year, 1999);
        let car = CarForm::new("Ada", "Fiat", "500", "1_9_5_7").parse().unwrap();
        assert_eq!(car.year, 1957);
    }

    #[test]
    fn misplaced_underscores_are_invalid() {
        for year in ["_1999", "1999_", "19__99", "+_1999"] {
            let err = CarForm::new("Ada", "Fiat", "500", year).parse().unwrap_err();
            assert_eq!(err, CarValidationError::InvalidYear(year.to_string()));
        }
    }

    #[test]
    fn parse_accepts_decimal_digits_from_other_scripts() {
        // Arabic-Indic, Devanagari, fullwidth, mathematical bold
        for year in [
            "\u{661}\u{669}\u{669}\u{669}",
            "\u{967}\u{96F}\u{96F}\u{96F}",
            "\u{FF11}\u{FF19}\u{FF19}\u{FF19}",
            "\u{1D7CF}\u{1D7D7}\u{1D7D7}\u{1D7D7}",
        ] {
            let car = CarForm::new("Ada", "Fiat", "500", year).parse().unwrap();
            assert_eq!(car.year, 1999, "year text {year:?}");
        }
    }

    #[test]
    fn mixed_script_digits_combine() {
        let car = CarForm::new("Ada", "Fiat", "500", "19\u{669}\u{669}")
            .parse()
            .unwrap();
        assert_eq!(car.year, 1999);
    }

    #[test]
    fn non_decimal_numerals_are_invalid() {
        // superscript two, roman numeral, vulgar fraction
        for year in ["\u{B2}000", "\u{216B}", "19\u{BD}"] {
            let err = CarForm::new("Ada", "Fiat", "500", year).parse().unwrap_err();
            assert_eq!(err, CarValidationError::InvalidYear(year.to_string()));
        }
    }

    #[test]
    fn oversized_year_is_out_of_range() {
        let err = CarForm::new("Ada", "Fiat", "500", "99999999999999999999")
            .parse()
            .unwrap_err();
        assert_eq!(err, CarValidationError::YearOutOfRange(i64::MAX));
    }

    #[test]
    fn missing_field_reports_first_blank_in_form_order() {
        let form = CarForm::new("Ada", "  ", "", "1999");
        assert_eq!(
            form.parse().unwrap_err(),
            CarValidationError::MissingField(CarField::Make)
        );
    }

    #[test]
    fn required_check_wins_over_bad_year() {
        let form = CarForm::new("", "Ford", "T", "not a year");
        assert_eq!(
            form.parse().unwrap_err(),
            CarValidationError::MissingField(CarField::OwnerName)
        );
    }

    #[test]
    fn non_numeric_year_is_invalid() {
        for year in ["19x0", "1999.0", "two thousand", "+", "-", "19 99"] {
            let err = CarForm::new("Ada", "Ford", "T", year).parse().unwrap_err();
            assert_eq!(err, CarValidationError::InvalidYear(year.to_string()));
        }
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let err = CarForm::new("Ada", "Ford", "T", "1885").parse().unwrap_err();
        assert_eq!(err, CarValidationError::YearOutOfRange(1885));
        let err = CarForm::new("Ada", "Ford", "T", "2026").parse().unwrap_err();
        assert_eq!(err, CarValidationError::YearOutOfRange(2026));
    }

    #[test]
    fn clear_empties_every_field() {
        let mut form = CarForm::new("Ada", "Ford", "T", "1920");
        assert!(!form.is_blank());
        form.clear();
        assert!(form.is_blank());
        assert_eq!(form, CarForm::default());
    }
}
