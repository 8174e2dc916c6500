use crate::domain::model::{CountryCodeSource, NumberFormat, PhoneNumberRecord};
use crate::domain::ports::PhoneNumberUtil;
use crate::utils::error::{AppError, Result};
use phonenumber::country::{self, Source};
use phonenumber::{Mode, PhoneNumber};

/// `PhoneNumberUtil` backed by the `phonenumber` crate and its bundled metadata.
#[derive(Debug, Clone, Default)]
pub struct LibPhoneNumberUtil;

impl LibPhoneNumberUtil {
    pub fn new() -> Self {
        Self
    }

    fn parse_library(&self, number: Option<&str>, region: Option<&str>) -> Result<PhoneNumber> {
        let number = number.ok_or(AppError::NotANumber)?;
        if !number.chars().any(|c| c.is_numeric()) {
            return Err(AppError::NotANumber);
        }

        let country = resolve_region(number, region)?;

        phonenumber::parse(country, number).map_err(|e| AppError::ParseError {
            message: e.to_string(),
        })
    }
}

fn is_international(number: &str) -> bool {
    let trimmed = number.trim_start();
    trimmed.starts_with('+') || trimmed.starts_with('＋')
}

/// 將地區代碼轉換為函式庫的國家 ID；以 + 開頭的號碼不需要地區
fn resolve_region(number: &str, region: Option<&str>) -> Result<Option<country::Id>> {
    let international = is_international(number);

    match region {
        Some(region) => match region.trim().to_ascii_uppercase().parse::<country::Id>() {
            Ok(id) => Ok(Some(id)),
            Err(_) if international => Ok(None),
            Err(_) => Err(AppError::InvalidCountryCode {
                region: region.to_string(),
            }),
        },
        None if international => Ok(None),
        None => Err(AppError::InvalidCountryCode {
            region: String::new(),
        }),
    }
}

fn country_code_source(source: Source) -> CountryCodeSource {
    match source {
        Source::Plus => CountryCodeSource::FromNumberWithPlusSign,
        Source::Idd => CountryCodeSource::FromNumberWithIdd,
        Source::Number => CountryCodeSource::FromNumberWithoutPlusSign,
        Source::Default => CountryCodeSource::FromDefaultCountry,
    }
}

fn to_record(number: &PhoneNumber, raw_input: Option<&str>) -> PhoneNumberRecord {
    let zeros = u8::try_from(number.national().zeros()).unwrap_or(u8::MAX);
    let keep_raw = raw_input.is_some();

    PhoneNumberRecord {
        country_code: Some(number.code().value()),
        national_number: Some(number.national().value()),
        extension: number.extension().map(|ext| ext.to_string()),
        italian_leading_zero: (zeros > 0).then_some(true),
        number_of_leading_zeros: (zeros > 1).then_some(zeros),
        raw_input: raw_input.map(str::to_string),
        country_code_source: keep_raw.then(|| country_code_source(number.code().source())),
        preferred_domestic_carrier_code: if keep_raw {
            number.carrier().map(|carrier| carrier.to_string())
        } else {
            None
        },
    }
}

/// 由紀錄重建 E.164 字串後再交給函式庫解析
fn to_library_number(record: &PhoneNumberRecord) -> Result<PhoneNumber> {
    let country_code = record.country_code.ok_or_else(|| AppError::InternalError {
        message: "record has no country code".to_string(),
    })?;
    let national_number = record
        .national_number
        .ok_or_else(|| AppError::InternalError {
            message: "record has no national number".to_string(),
        })?;

    let mut e164 = format!(
        "+{}{}{}",
        country_code,
        "0".repeat(usize::from(record.leading_zeros())),
        national_number
    );
    if let Some(extension) = record.extension.as_deref().filter(|ext| !ext.is_empty()) {
        e164.push_str(" ext. ");
        e164.push_str(extension);
    }

    phonenumber::parse(None, &e164).map_err(|e| AppError::InternalError {
        message: format!("failed to rebuild '{}': {}", e164, e),
    })
}

impl PhoneNumberUtil for LibPhoneNumberUtil {
    fn parse(&self, number: Option<&str>, region: Option<&str>) -> Result<PhoneNumberRecord> {
        let parsed = self.parse_library(number, region)?;
        Ok(to_record(&parsed, None))
    }

    fn parse_and_keep_raw_input(
        &self,
        number: Option<&str>,
        region: Option<&str>,
    ) -> Result<PhoneNumberRecord> {
        let parsed = self.parse_library(number, region)?;
        Ok(to_record(&parsed, number))
    }

    fn format(&self, record: &PhoneNumberRecord, style: NumberFormat) -> Result<String> {
        let number = to_library_number(record)?;
        let mode = match style {
            NumberFormat::E164 => Mode::E164,
            NumberFormat::International => Mode::International,
            NumberFormat::National => Mode::National,
            NumberFormat::Rfc3966 => Mode::Rfc3966,
        };
        Ok(number.format().mode(mode).to_string())
    }
}
