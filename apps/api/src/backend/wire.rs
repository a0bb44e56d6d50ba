//! Decoder for job-description records returned by the scoring backend.
//!
//! The backend has shipped several record shapes. This module accepts a
//! closed set of them and turns each into the single `Shortlist`/`Candidate`
//! model; anything outside that set is a `DecodeError`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::candidate::{MAX_JD_SCORE, MAX_OVERALL_SCORE, MAX_SKILLS_SCORE, MAX_SKILL_SCORE};
use crate::models::parameter::{MAX_WEIGHT, MIN_WEIGHT};
use crate::models::{Candidate, ScoreBreakdown, Shortlist, SkillParameter};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported number encoding: {0}")]
    UnsupportedNumber(String),

    #[error("{field} must be an integer, got {value}")]
    NotAnInteger { field: String, value: f64 },

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("candidate '{0}' carries neither a skills map with an overall score nor a score breakdown")]
    UnrecognizedCandidate(String),

    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accepted number encodings: a plain JSON number, or a single-key extended
/// JSON wrapper (`$numberInt`, `$numberLong`, `$numberDouble`) holding a string.
pub fn decode_number(value: &Value) -> Result<f64, DecodeError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DecodeError::UnsupportedNumber(value.to_string())),
        Value::Object(map) if map.len() == 1 => {
            let (key, inner) = map
                .iter()
                .next()
                .ok_or_else(|| DecodeError::UnsupportedNumber(value.to_string()))?;
            match (key.as_str(), inner) {
                ("$numberInt" | "$numberLong" | "$numberDouble", Value::String(s)) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| DecodeError::UnsupportedNumber(value.to_string())),
                _ => Err(DecodeError::UnsupportedNumber(value.to_string())),
            }
        }
        _ => Err(DecodeError::UnsupportedNumber(value.to_string())),
    }
}

/// A number in any of the encodings `decode_number` accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireNumber(pub f64);

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_number(&value)
            .map(WireNumber)
            .map_err(de::Error::custom)
    }
}

impl WireNumber {
    fn bounded(self, field: &str, min: f64, max: f64) -> Result<f64, DecodeError> {
        if self.0 < min || self.0 > max {
            return Err(DecodeError::OutOfRange {
                field: field.to_string(),
                value: self.0,
                min,
                max,
            });
        }
        Ok(self.0)
    }

    fn bounded_int(self, field: &str, min: u8, max: u8) -> Result<u8, DecodeError> {
        if self.0.fract() != 0.0 {
            return Err(DecodeError::NotAnInteger {
                field: field.to_string(),
                value: self.0,
            });
        }
        let value = self.bounded(field, f64::from(min), f64::from(max))?;
        Ok(value as u8)
    }
}

/// Record ids arrive as strings, numbers or `{"$oid": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
            RawId::ObjectId { oid } => oid,
        }
    }
}

/// A JSON object whose key order is kept, used for the skill → weight map so
/// parameters come back in the order the recruiter entered them.
#[derive(Debug, Default)]
struct OrderedWeights(Vec<(String, WireNumber)>);

impl<'de> Deserialize<'de> for OrderedWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeightsVisitor;

        impl<'de> Visitor<'de> for WeightsVisitor {
            type Value = OrderedWeights;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill name to weight")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, weight)) = access.next_entry::<String, WireNumber>()? {
                    entries.push((name, weight));
                }
                Ok(OrderedWeights(entries))
            }
        }

        deserializer.deserialize_map(WeightsVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(default, alias = "_id", alias = "candidate_id")]
    id: Option<RawId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "resumeUrl")]
    resume_url: Option<String>,
    #[serde(default, alias = "skill_scores")]
    skills: Option<BTreeMap<String, WireNumber>>,
    #[serde(default, alias = "overallScore")]
    overall_score: Option<WireNumber>,
    #[serde(default, alias = "jdScore")]
    jd_score: Option<WireNumber>,
    #[serde(default, alias = "skillsScore")]
    skills_score: Option<WireNumber>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "_id", alias = "id")]
    jd_id: RawId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    job_description: String,
    #[serde(default)]
    skills: OrderedWeights,
    #[serde(default)]
    candidates: Vec<RawCandidate>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHistory {
    Wrapped { history: Vec<RawRecord> },
    Bare(Vec<RawRecord>),
}

/// Decodes a single `GET /jd/{id}` body.
///
/// Works on the raw text rather than a `serde_json::Value` so the skill map
/// keeps its key order.
pub fn decode_record(body: &str) -> Result<Shortlist, DecodeError> {
    shortlist_from_raw(serde_json::from_str(body)?)
}

/// Decodes `GET /jd/history`, either `{"history": [...]}` or a bare array.
pub fn decode_history(body: &str) -> Result<Vec<Shortlist>, DecodeError> {
    let records = match serde_json::from_str::<RawHistory>(body)? {
        RawHistory::Wrapped { history } => history,
        RawHistory::Bare(records) => records,
    };
    records.into_iter().map(shortlist_from_raw).collect()
}

fn shortlist_from_raw(raw: RawRecord) -> Result<Shortlist, DecodeError> {
    let parameters = raw
        .skills
        .0
        .into_iter()
        .map(|(name, weight)| {
            let weight = weight.bounded_int(&format!("weight of '{name}'"), MIN_WEIGHT, MAX_WEIGHT)?;
            Ok(SkillParameter::new(name, weight))
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    let candidates = raw
        .candidates
        .into_iter()
        .map(decode_candidate)
        .collect::<Result<Vec<_>, _>>()?;

    let last_modified = raw
        .updated_at
        .or(raw.created_at)
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| raw.job_title.clone());

    Ok(Shortlist {
        id: Some(raw.jd_id.into()),
        title,
        job_title: raw.job_title,
        job_description: raw.job_description,
        parameters,
        candidates,
        last_modified,
        is_draft: false,
    })
}

fn decode_candidate(raw: RawCandidate) -> Result<Candidate, DecodeError> {
    let name = raw.name.unwrap_or_default();
    let had_skills = raw.skills.is_some();
    let id = match raw.id {
        Some(id) => String::from(id),
        None => {
            debug!("candidate '{name}' arrived without an id, assigning one");
            Uuid::new_v4().to_string()
        }
    };

    let skills = raw
        .skills
        .unwrap_or_default()
        .into_iter()
        .map(|(skill, score)| {
            let score = score.bounded_int(&format!("score of '{skill}'"), 0, MAX_SKILL_SCORE)?;
            Ok((skill, score))
        })
        .collect::<Result<BTreeMap<_, _>, DecodeError>>()?;

    let (overall_score, breakdown) = match (raw.jd_score, raw.skills_score, raw.overall_score) {
        (Some(jd), Some(sk), overall) => {
            let breakdown = ScoreBreakdown {
                jd_score: jd.bounded("jd_score", 0.0, MAX_JD_SCORE)?,
                skills_score: sk.bounded("skills_score", 0.0, MAX_SKILLS_SCORE)?,
            };
            let overall = overall
                .unwrap_or(WireNumber(breakdown.jd_score + breakdown.skills_score))
                .bounded("overall_score", 0.0, MAX_OVERALL_SCORE)?;
            (overall, Some(breakdown))
        }
        (None, None, Some(overall)) if had_skills => (
            overall.bounded("overall_score", 0.0, MAX_OVERALL_SCORE)?,
            None,
        ),
        _ => return Err(DecodeError::UnrecognizedCandidate(name)),
    };

    Ok(Candidate {
        id,
        name,
        phone: raw.phone.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
        resume_url: raw.resume_url.unwrap_or_default(),
        skills,
        overall_score,
        breakdown,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Serializes parameters as the backend's `{name: weight}` map, in list order.
pub fn serialize_weights<S: Serializer>(
    parameters: &[SkillParameter],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(parameters.len()))?;
    for param in parameters {
        map.serialize_entry(&param.name, &param.weight)?;
    }
    map.end()
}
