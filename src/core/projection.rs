use crate::domain::model::{occurrence_count, PhoneNumberRecord};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// JSON keys for the four projections of one record field.
struct FieldKeys {
    value: &'static str,
    or_default: &'static str,
    has: &'static str,
    count: &'static str,
}

const COUNTRY_CODE: FieldKeys = FieldKeys {
    value: "countryCode",
    or_default: "countryCodeOrDefault",
    has: "hasCountryCode",
    count: "countryCodeCount",
};
const NATIONAL_NUMBER: FieldKeys = FieldKeys {
    value: "nationalNumber",
    or_default: "nationalNumberOrDefault",
    has: "hasNationalNumber",
    count: "nationalNumberCount",
};
const EXTENSION: FieldKeys = FieldKeys {
    value: "extension",
    or_default: "extensionOrDefault",
    has: "hasExtension",
    count: "extensionCount",
};
const ITALIAN_LEADING_ZERO: FieldKeys = FieldKeys {
    value: "italianLeadingZero",
    or_default: "italianLeadingZeroOrDefault",
    has: "hasItalianLeadingZero",
    count: "italianLeadingZeroCount",
};
const NUMBER_OF_LEADING_ZEROS: FieldKeys = FieldKeys {
    value: "numberOfLeadingZeros",
    or_default: "numberOfLeadingZerosOrDefault",
    has: "hasNumberOfLeadingZeros",
    count: "numberOfLeadingZerosCount",
};
const RAW_INPUT: FieldKeys = FieldKeys {
    value: "rawInput",
    or_default: "rawInputOrDefault",
    has: "hasRawInput",
    count: "rawInputCount",
};
const COUNTRY_CODE_SOURCE: FieldKeys = FieldKeys {
    value: "countryCodeSource",
    or_default: "countryCodeSourceOrDefault",
    has: "hasCountryCodeSource",
    count: "countryCodeSourceCount",
};
const PREFERRED_DOMESTIC_CARRIER_CODE: FieldKeys = FieldKeys {
    value: "preferredDomesticCarrierCode",
    or_default: "preferredDomesticCarrierCodeOrDefault",
    has: "hasPreferredDomesticCarrierCode",
    count: "preferredDomesticCarrierCodeCount",
};

const FIELD_COUNT: usize = 32;

/// Flat, JSON-safe view of a [`PhoneNumberRecord`].
///
/// Emits `x`, `xOrDefault`, `hasX` and `xCount` for each of the eight record
/// fields, always all 32 keys. An absent `x` is written as `null`, so `hasX`
/// always matches whether `x` is non-null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePhoneNumber(PhoneNumberRecord);

impl ResponsePhoneNumber {
    pub fn record(&self) -> &PhoneNumberRecord {
        &self.0
    }
}

impl From<PhoneNumberRecord> for ResponsePhoneNumber {
    fn from(record: PhoneNumberRecord) -> Self {
        Self(record)
    }
}

fn project<S, T, D>(
    state: &mut S,
    keys: &FieldKeys,
    value: &Option<T>,
    or_default: D,
) -> Result<(), S::Error>
where
    S: SerializeStruct,
    T: Serialize,
    D: Serialize,
{
    state.serialize_field(keys.value, value)?;
    state.serialize_field(keys.or_default, &or_default)?;
    state.serialize_field(keys.has, &value.is_some())?;
    state.serialize_field(keys.count, &occurrence_count(value))
}

impl Serialize for ResponsePhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = &self.0;
        let mut state = serializer.serialize_struct("ResponsePhoneNumber", FIELD_COUNT)?;

        project(
            &mut state,
            &COUNTRY_CODE,
            &record.country_code,
            record.country_code_or_default(),
        )?;
        project(
            &mut state,
            &NATIONAL_NUMBER,
            &record.national_number,
            record.national_number_or_default(),
        )?;
        project(
            &mut state,
            &EXTENSION,
            &record.extension,
            record.extension_or_default(),
        )?;
        project(
            &mut state,
            &ITALIAN_LEADING_ZERO,
            &record.italian_leading_zero,
            record.italian_leading_zero_or_default(),
        )?;
        project(
            &mut state,
            &NUMBER_OF_LEADING_ZEROS,
            &record.number_of_leading_zeros,
            record.number_of_leading_zeros_or_default(),
        )?;
        project(
            &mut state,
            &RAW_INPUT,
            &record.raw_input,
            record.raw_input_or_default(),
        )?;
        project(
            &mut state,
            &COUNTRY_CODE_SOURCE,
            &record.country_code_source,
            record.country_code_source_or_default(),
        )?;
        project(
            &mut state,
            &PREFERRED_DOMESTIC_CARRIER_CODE,
            &record.preferred_domestic_carrier_code,
            record.preferred_domestic_carrier_code_or_default(),
        )?;

        state.end()
    }
}
