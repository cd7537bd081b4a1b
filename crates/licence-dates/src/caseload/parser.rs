use crate::release::{CaseRecord, LicenceStatus, SentenceDateSet};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CaseRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<CaseloadRow>() {
        records.push(record?.into_case());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CaseloadRow {
    case_id: String,
    #[serde(default, deserialize_with = "optional_status")]
    status: Option<LicenceStatus>,
    #[serde(default, deserialize_with = "optional_date")]
    conditional_release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    actual_release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    post_recall_release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    sentence_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    sentence_end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    licence_expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    top_up_supervision_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    top_up_supervision_expiry_date: Option<NaiveDate>,
    #[serde(rename = "hdc_actual_date", default, deserialize_with = "optional_date")]
    home_detention_curfew_actual_date: Option<NaiveDate>,
    #[serde(rename = "hdc_end_date", default, deserialize_with = "optional_date")]
    home_detention_curfew_end_date: Option<NaiveDate>,
    #[serde(rename = "hdc_eligibility_date", default, deserialize_with = "optional_date")]
    home_detention_curfew_eligibility_date: Option<NaiveDate>,
    #[serde(rename = "hdc", default, deserialize_with = "flag")]
    home_detention_curfew: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    legal_status: Option<String>,
    #[serde(rename = "is91", default, deserialize_with = "flag")]
    is91_case: bool,
    #[serde(default, deserialize_with = "flag")]
    time_served: bool,
}

impl CaseloadRow {
    fn into_case(self) -> CaseRecord {
        CaseRecord {
            case_id: self.case_id,
            status: self.status.unwrap_or(LicenceStatus::NotStarted),
            dates: SentenceDateSet {
                conditional_release_date: self.conditional_release_date,
                actual_release_date: self.actual_release_date,
                post_recall_release_date: self.post_recall_release_date,
                sentence_start_date: self.sentence_start_date,
                sentence_end_date: self.sentence_end_date,
                licence_expiry_date: self.licence_expiry_date,
                top_up_supervision_start_date: self.top_up_supervision_start_date,
                top_up_supervision_expiry_date: self.top_up_supervision_expiry_date,
                home_detention_curfew_actual_date: self.home_detention_curfew_actual_date,
                home_detention_curfew_end_date: self.home_detention_curfew_end_date,
                home_detention_curfew_eligibility_date: self
                    .home_detention_curfew_eligibility_date,
            },
            home_detention_curfew: self.home_detention_curfew,
            legal_status: self.legal_status,
            is91_case: self.is91_case,
            time_served: self.time_served,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer)?
        .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

fn optional_status<'de, D>(deserializer: D) -> Result<Option<LicenceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer)?
        .map(|raw| raw.parse::<LicenceStatus>().map_err(serde::de::Error::custom))
        .transpose()
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(false),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(true),
            "false" | "no" | "n" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a yes/no flag, got '{other}'"
            ))),
        },
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|err| format!("failed to parse '{trimmed}' as a date ({err})"))
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Result<NaiveDate, String> {
    parse_date(value)
}
