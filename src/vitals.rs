//! Vitals record parsing and intake.
//!
//! The control page writes a JSON record to a shared file; the display polls
//! it every second (the demo-mode channel). A remote peer can push the same
//! record shape through [`VitalsIntake::submit`], which is the landing point
//! of the cross-device path.
//!
//! The record's numeric fields arrive as whatever the control form produced -
//! usually JSON strings, sometimes numbers, sometimes garbage. Parsing is
//! deliberately lenient: a field that is missing or does not parse as a
//! finite number simply reads as "no signal" through the typed accessors.
//! Nothing in this module panics on malformed input.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Record Fields
// =============================================================================

/// A single vitals field as it appears on the wire: the control form submits
/// strings, a remote peer may send numbers. Both deserialize transparently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalField {
    /// Already-numeric value.
    Number(f64),
    /// Free-text value, hopefully parseable as a number.
    Text(String),
    /// Anything else a peer might send (bool, array, object). Kept so one
    /// odd field degrades to "no signal" instead of rejecting the record.
    Other(serde_json::Value),
}

impl VitalField {
    /// The field as a finite `f32`, or `None` for anything unparseable.
    pub fn as_f32(&self) -> Option<f32> {
        let value = match self {
            Self::Number(n) => *n as f32,
            Self::Text(s) => s.trim().parse::<f32>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Parse an optional field as a finite number.
fn numeric(field: Option<&VitalField>) -> Option<f32> {
    field.and_then(VitalField::as_f32)
}

/// Parse an optional field as a finite, strictly positive number. Zero and
/// negative readings count as "no signal" for waveform pacing and beeps.
fn positive(field: Option<&VitalField>) -> Option<f32> {
    numeric(field).filter(|v| *v > 0.0)
}

// =============================================================================
// Vitals Record
// =============================================================================

/// The record shape shared between the control and display pages.
///
/// Field names match the control form's JSON exactly. Unknown fields are
/// ignored, missing fields default to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsRecord {
    #[serde(rename = "heartRate")]
    pub heart_rate: Option<VitalField>,
    pub spo2: Option<VitalField>,
    #[serde(rename = "bloodPressureSys")]
    pub blood_pressure_sys: Option<VitalField>,
    #[serde(rename = "bloodPressureDia")]
    pub blood_pressure_dia: Option<VitalField>,
    pub temperature: Option<VitalField>,
    #[serde(rename = "respiratoryRate")]
    pub respiratory_rate: Option<VitalField>,
    /// Free-text clinical observations.
    pub observations: Option<String>,
    /// ISO-8601 timestamp written by the control page.
    pub timestamp: Option<String>,
}

impl VitalsRecord {
    /// Heart rate valid for pacing waveforms and beeps (finite, > 0).
    pub fn heart_rate_bpm(&self) -> Option<f32> {
        positive(self.heart_rate.as_ref())
    }

    /// SpO2 valid for pleth rendering and beeps (finite, > 0).
    pub fn spo2_percent(&self) -> Option<f32> {
        positive(self.spo2.as_ref())
    }

    /// Heart rate for numeric display (any finite value, including 0).
    pub fn heart_rate_display(&self) -> Option<f32> {
        numeric(self.heart_rate.as_ref())
    }

    /// SpO2 for numeric display.
    pub fn spo2_display(&self) -> Option<f32> {
        numeric(self.spo2.as_ref())
    }

    /// Systolic blood pressure for display.
    pub fn bp_sys(&self) -> Option<f32> {
        numeric(self.blood_pressure_sys.as_ref())
    }

    /// Diastolic blood pressure for display.
    pub fn bp_dia(&self) -> Option<f32> {
        numeric(self.blood_pressure_dia.as_ref())
    }

    /// Body temperature for display.
    pub fn temperature_c(&self) -> Option<f32> {
        numeric(self.temperature.as_ref())
    }

    /// Respiratory rate for display.
    pub fn respiratory_rate_pm(&self) -> Option<f32> {
        numeric(self.respiratory_rate.as_ref())
    }

    /// Observations text, trimmed; `None` when absent or blank.
    pub fn observations_text(&self) -> Option<&str> {
        self.observations.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Intake
// =============================================================================

/// Intake failures. All are recoverable: the display keeps showing the last
/// good record and surfaces the error on the debug log only.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read vitals file: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed vitals record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Polls the shared vitals file and holds the latest record.
///
/// The poll cadence is rate-limited internally; calling [`poll`] every frame
/// costs nothing between poll intervals. A missing file is not an error - it
/// just means the control page has not submitted yet.
///
/// [`poll`]: VitalsIntake::poll
pub struct VitalsIntake {
    path: PathBuf,
    interval: Duration,
    last_poll: Option<Instant>,
    latest: Option<VitalsRecord>,
}

impl VitalsIntake {
    /// Create an intake polling `path` at the given interval.
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            last_poll: None,
            latest: None,
        }
    }

    /// Poll the shared file if the interval has elapsed.
    ///
    /// Returns `Ok(true)` when a new (different) record replaced the previous
    /// one. A missing file returns `Ok(false)`; read and parse failures keep
    /// the previous record and return the error for logging.
    pub fn poll(&mut self, now: Instant) -> Result<bool, IntakeError> {
        if let Some(last) = self.last_poll
            && now.duration_since(last) < self.interval
        {
            return Ok(false);
        }
        // Rate-limit even when the read fails, so a broken file does not
        // turn into a read storm.
        self.last_poll = Some(now);

        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let record: VitalsRecord = serde_json::from_str(&raw)?;
        Ok(self.replace(record))
    }

    /// Accept a record pushed by a remote peer (the cross-device path).
    /// Returns `true` when it differed from the previous record.
    #[allow(dead_code)] // Push delivery lands here when a transport is wired up
    pub fn submit(&mut self, record: VitalsRecord) -> bool {
        self.replace(record)
    }

    /// The most recent record, if any has arrived.
    pub fn latest(&self) -> Option<&VitalsRecord> {
        self.latest.as_ref()
    }

    fn replace(&mut self, record: VitalsRecord) -> bool {
        let changed = self.latest.as_ref() != Some(&record);
        self.latest = Some(record);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn record_from(json: &str) -> VitalsRecord {
        serde_json::from_str(json).expect("record should parse")
    }

    #[test]
    fn test_parse_form_record_with_string_fields() {
        // The control form stores every input as a string
        let rec = record_from(
            r#"{
                "heartRate": "72",
                "spo2": "98",
                "bloodPressureSys": "120",
                "bloodPressureDia": "80",
                "temperature": "36.6",
                "respiratoryRate": "16",
                "observations": "Patient resting",
                "timestamp": "2024-05-01T10:30:00.000Z"
            }"#,
        );
        assert_eq!(rec.heart_rate_bpm(), Some(72.0));
        assert_eq!(rec.spo2_percent(), Some(98.0));
        assert_eq!(rec.bp_sys(), Some(120.0));
        assert_eq!(rec.bp_dia(), Some(80.0));
        assert_eq!(rec.temperature_c(), Some(36.6));
        assert_eq!(rec.respiratory_rate_pm(), Some(16.0));
        assert_eq!(rec.observations_text(), Some("Patient resting"));
    }

    #[test]
    fn test_parse_numeric_fields() {
        // A remote peer may send proper numbers instead of strings
        let rec = record_from(r#"{"heartRate": 72, "spo2": 98.5}"#);
        assert_eq!(rec.heart_rate_bpm(), Some(72.0));
        assert_eq!(rec.spo2_percent(), Some(98.5));
    }

    #[test]
    fn test_malformed_numerics_read_as_no_signal() {
        let rec = record_from(r#"{"heartRate": "abc", "spo2": ""}"#);
        assert_eq!(rec.heart_rate_bpm(), None, "garbage heart rate is no signal");
        assert_eq!(rec.spo2_percent(), None, "empty SpO2 is no signal");
        assert_eq!(rec.heart_rate_display(), None);
    }

    #[test]
    fn test_zero_and_negative_rates_are_no_signal_but_displayable() {
        let rec = record_from(r#"{"heartRate": "0", "spo2": "-5"}"#);
        assert_eq!(rec.heart_rate_bpm(), None, "zero rate must not pace anything");
        assert_eq!(rec.spo2_percent(), None, "negative SpO2 must not pace anything");
        // The numeric column still shows the raw reading
        assert_eq!(rec.heart_rate_display(), Some(0.0));
        assert_eq!(rec.spo2_display(), Some(-5.0));
    }

    #[test]
    fn test_wrong_typed_field_degrades_alone() {
        // A bool where a number belongs must not reject the whole record
        let rec = record_from(r#"{"heartRate": true, "spo2": "97"}"#);
        assert_eq!(rec.heart_rate_bpm(), None, "bool heart rate is no signal");
        assert_eq!(rec.spo2_percent(), Some(97.0), "the rest of the record survives");
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let rec = record_from("{}");
        assert_eq!(rec.heart_rate_bpm(), None);
        assert_eq!(rec.observations_text(), None);
        assert_eq!(rec.timestamp, None);
    }

    #[test]
    fn test_blank_observations_are_none() {
        let rec = record_from(r#"{"observations": "   "}"#);
        assert_eq!(rec.observations_text(), None, "whitespace-only text is no observation");
    }

    #[test]
    fn test_whitespace_around_numbers_is_tolerated() {
        let rec = record_from(r#"{"heartRate": " 64 "}"#);
        assert_eq!(rec.heart_rate_bpm(), Some(64.0));
    }

    #[test]
    fn test_poll_reads_and_deduplicates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vitals.json");
        std::fs::write(&path, r#"{"heartRate": "70", "spo2": "97"}"#).expect("write");

        let mut intake = VitalsIntake::new(&path, Duration::from_millis(0));
        let now = Instant::now();

        assert!(intake.poll(now).expect("first poll"), "first record is a change");
        assert_eq!(intake.latest().and_then(VitalsRecord::heart_rate_bpm), Some(70.0));

        // Same content again: no change reported
        assert!(!intake.poll(now + Duration::from_millis(1)).expect("second poll"));
    }

    #[test]
    fn test_poll_rate_limited() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vitals.json");
        std::fs::write(&path, r#"{"heartRate": "70"}"#).expect("write");

        let mut intake = VitalsIntake::new(&path, Duration::from_secs(1));
        let now = Instant::now();
        assert!(intake.poll(now).expect("poll"));

        // Update the file; within the interval the change is not picked up
        std::fs::write(&path, r#"{"heartRate": "80"}"#).expect("write");
        assert!(!intake.poll(now + Duration::from_millis(10)).expect("poll"));
        assert_eq!(intake.latest().and_then(VitalsRecord::heart_rate_bpm), Some(70.0));

        // After the interval elapses the new record lands
        assert!(intake.poll(now + Duration::from_millis(1100)).expect("poll"));
        assert_eq!(intake.latest().and_then(VitalsRecord::heart_rate_bpm), Some(80.0));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut intake = VitalsIntake::new(dir.path().join("nope.json"), Duration::from_millis(0));
        assert!(!intake.poll(Instant::now()).expect("missing file should be Ok(false)"));
        assert!(intake.latest().is_none());
    }

    #[test]
    fn test_malformed_file_keeps_previous_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vitals.json");
        std::fs::write(&path, r#"{"heartRate": "70"}"#).expect("write");

        let mut intake = VitalsIntake::new(&path, Duration::from_millis(0));
        let now = Instant::now();
        intake.poll(now).expect("good poll");

        let mut f = std::fs::File::create(&path).expect("truncate");
        f.write_all(b"{not json").expect("write garbage");
        drop(f);

        let result = intake.poll(now + Duration::from_millis(1));
        assert!(matches!(result, Err(IntakeError::Parse(_))), "garbage should report a parse error");
        assert_eq!(
            intake.latest().and_then(VitalsRecord::heart_rate_bpm),
            Some(70.0),
            "previous record must survive a bad poll"
        );
    }

    #[test]
    fn test_submit_pushes_record_directly() {
        let mut intake = VitalsIntake::new("unused.json", Duration::from_secs(1));
        let rec = record_from(r#"{"heartRate": 55}"#);
        assert!(intake.submit(rec.clone()), "first push is a change");
        assert!(!intake.submit(rec), "identical push is not a change");
    }
}
