use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::AppError;

/// 解析時國碼的來源，數值與 libphonenumber 的 protobuf 列舉一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryCodeSource {
    #[default]
    Unspecified,
    FromNumberWithPlusSign,
    FromNumberWithIdd,
    FromNumberWithoutPlusSign,
    FromDefaultCountry,
}

impl CountryCodeSource {
    pub fn value(self) -> u8 {
        match self {
            CountryCodeSource::Unspecified => 0,
            CountryCodeSource::FromNumberWithPlusSign => 1,
            CountryCodeSource::FromNumberWithIdd => 5,
            CountryCodeSource::FromNumberWithoutPlusSign => 10,
            CountryCodeSource::FromDefaultCountry => 20,
        }
    }
}

impl Serialize for CountryCodeSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

pub const DEFAULT_NUMBER_OF_LEADING_ZEROS: u8 = 1;

/// A parsed phone number. Every field is stored once; presence, default and
/// occurrence count are derived on read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneNumberRecord {
    pub country_code: Option<u16>,
    pub national_number: Option<u64>,
    pub extension: Option<String>,
    pub italian_leading_zero: Option<bool>,
    pub number_of_leading_zeros: Option<u8>,
    pub raw_input: Option<String>,
    pub country_code_source: Option<CountryCodeSource>,
    pub preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumberRecord {
    pub fn country_code_or_default(&self) -> u16 {
        self.country_code.unwrap_or_default()
    }

    pub fn national_number_or_default(&self) -> u64 {
        self.national_number.unwrap_or_default()
    }

    pub fn extension_or_default(&self) -> &str {
        self.extension.as_deref().unwrap_or_default()
    }

    pub fn italian_leading_zero_or_default(&self) -> bool {
        self.italian_leading_zero.unwrap_or_default()
    }

    pub fn number_of_leading_zeros_or_default(&self) -> u8 {
        self.number_of_leading_zeros
            .unwrap_or(DEFAULT_NUMBER_OF_LEADING_ZEROS)
    }

    pub fn raw_input_or_default(&self) -> &str {
        self.raw_input.as_deref().unwrap_or_default()
    }

    pub fn country_code_source_or_default(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn preferred_domestic_carrier_code_or_default(&self) -> &str {
        self.preferred_domestic_carrier_code
            .as_deref()
            .unwrap_or_default()
    }

    /// 國碼後方實際的前導零個數
    pub fn leading_zeros(&self) -> u8 {
        if self.italian_leading_zero_or_default() {
            self.number_of_leading_zeros_or_default()
        } else {
            0
        }
    }
}

/// Occurrence count of an optional field: 1 when set, 0 otherwise.
pub fn occurrence_count<T>(value: &Option<T>) -> u32 {
    u32::from(value.is_some())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    E164,
    International,
    National,
    Rfc3966,
}

impl FromStr for NumberFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "e164" => Ok(NumberFormat::E164),
            "international" => Ok(NumberFormat::International),
            "national" => Ok(NumberFormat::National),
            "rfc3966" => Ok(NumberFormat::Rfc3966),
            _ => Err(AppError::InvalidFormat {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberFormat::E164 => "e164",
            NumberFormat::International => "international",
            NumberFormat::National => "national",
            NumberFormat::Rfc3966 => "rfc3966",
        };
        f.write_str(name)
    }
}

/// Query parameters read by the parse endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestParams {
    pub number: Option<String>,
    pub region: Option<String>,
}
