//! Table reservations.
//!
//! A [`ReservationRequest`] carries the raw form values. [`ReservationRequest::validate`]
//! checks them against the service schedule and produces a typed
//! [`Reservation`]; [`ReservationBook`] keeps confirmed bookings in memory.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::{Email, EmailError};

/// Largest party bookable through the regular form.
pub const MAX_PARTY: u8 = 10;

/// Service windows as `(first seating, last seating)` in minutes after midnight.
const SERVICES: [(u32, u32); 2] = [(11 * 60, 14 * 60), (17 * 60, 21 * 60)];

const SLOT_MINUTES: usize = 30;

/// Every bookable seating time: lunch 11:00-14:00 and dinner 17:00-21:00,
/// every half hour.
pub fn service_slots() -> impl Iterator<Item = NaiveTime> {
    SERVICES.into_iter().flat_map(|(first, last)| {
        (first..=last)
            .step_by(SLOT_MINUTES)
            .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
    })
}

/// Whether `time` is one of the [`service_slots`].
#[must_use]
pub fn is_service_slot(time: NaiveTime) -> bool {
    service_slots().any(|slot| slot == time)
}

/// Errors returned when validating a reservation request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReservationError {
    #[error("name is required")]
    EmptyName,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("phone number is required")]
    EmptyPhone,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("{0} is in the past")]
    DateInPast(NaiveDate),

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("we do not seat guests at {0}")]
    OutsideServiceHours(NaiveTime),

    #[error("invalid party size: {0}")]
    InvalidPartySize(String),

    #[error("invalid table preference: {0}")]
    InvalidTablePreference(String),
}

/// Number of guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartySize {
    /// 1 to [`MAX_PARTY`] guests.
    Guests(u8),
    /// More than [`MAX_PARTY`]; handled as a special event.
    LargeEvent,
}

impl PartySize {
    /// Every option offered by the form, in order.
    pub fn options() -> impl Iterator<Item = Self> {
        (1..=MAX_PARTY)
            .map(Self::Guests)
            .chain(std::iter::once(Self::LargeEvent))
    }

    /// Form value: `"1"`..`"10"` or `"10+"`.
    #[must_use]
    pub fn value(self) -> String {
        match self {
            Self::Guests(n) => n.to_string(),
            Self::LargeEvent => format!("{MAX_PARTY}+"),
        }
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guests(1) => f.write_str("1 Guest"),
            Self::Guests(n) => write!(f, "{n} Guests"),
            Self::LargeEvent => write!(f, "{MAX_PARTY}+ Guests (Special Event)"),
        }
    }
}

impl std::str::FromStr for PartySize {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == format!("{MAX_PARTY}+") {
            return Ok(Self::LargeEvent);
        }
        match s.parse::<u8>() {
            Ok(n) if (1..=MAX_PARTY).contains(&n) => Ok(Self::Guests(n)),
            _ => Err(ReservationError::InvalidPartySize(s.to_owned())),
        }
    }
}

/// Seating preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TablePreference {
    #[default]
    Any,
    Window,
    Booth,
    Patio,
    Private,
}

impl TablePreference {
    pub const ALL: [Self; 5] = [
        Self::Any,
        Self::Window,
        Self::Booth,
        Self::Patio,
        Self::Private,
    ];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Window => "window",
            Self::Booth => "booth",
            Self::Patio => "patio",
            Self::Private => "private",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "No Preference",
            Self::Window => "Window Seating",
            Self::Booth => "Booth",
            Self::Patio => "Patio",
            Self::Private => "Private Room",
        }
    }
}

impl std::str::FromStr for TablePreference {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::Any);
        }
        Self::ALL
            .into_iter()
            .find(|pref| pref.value() == s)
            .ok_or_else(|| ReservationError::InvalidTablePreference(s.to_owned()))
    }
}

/// Raw reservation form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24-hour
    pub time: String,
    pub guests: String,
    #[serde(default)]
    pub table_preference: String,
    #[serde(default)]
    pub special_requests: String,
}

impl ReservationRequest {
    /// Validate the request against `today` and the service schedule.
    ///
    /// Rules are checked in form order and the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`ReservationError`] for the first rule that fails.
    pub fn validate(&self, today: NaiveDate) -> Result<Reservation, ReservationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ReservationError::EmptyName);
        }
        let email = Email::parse(&self.email)?;
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ReservationError::EmptyPhone);
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ReservationError::InvalidDate(self.date.clone()))?;
        if date < today {
            return Err(ReservationError::DateInPast(date));
        }

        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .map_err(|_| ReservationError::InvalidTime(self.time.clone()))?;
        if !is_service_slot(time) {
            return Err(ReservationError::OutsideServiceHours(time));
        }

        let party = self.guests.parse()?;
        let table_preference = self.table_preference.parse()?;
        let special_requests = Some(self.special_requests.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(Reservation {
            confirmation: confirmation_code(),
            name: name.to_owned(),
            email,
            phone: phone.to_owned(),
            date,
            time,
            party,
            table_preference,
            special_requests,
            created_at: Utc::now(),
        })
    }
}

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    /// Short code quoted to the guest, e.g. `3F9A01C2`.
    pub confirmation: String,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party: PartySize,
    pub table_preference: TablePreference,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Seating time as shown to guests, e.g. `7:30 PM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        slot_label(self.time)
    }
}

/// Format a seating time for display, e.g. `11:00 AM`.
#[must_use]
pub fn slot_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

fn confirmation_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(8);
    code.make_ascii_uppercase();
    code
}

/// In-memory list of confirmed reservations, in booking order.
#[derive(Debug, Clone, Default)]
pub struct ReservationBook {
    reservations: Vec<Reservation>,
}

impl ReservationBook {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reservations: Vec::new(),
        }
    }

    /// Validate and record a request.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservationError`] if the request is invalid; nothing is
    /// recorded in that case.
    pub fn book(
        &mut self,
        request: &ReservationRequest,
        today: NaiveDate,
    ) -> Result<Reservation, ReservationError> {
        let reservation = request.validate(today)?;
        tracing::info!(
            confirmation = %reservation.confirmation,
            date = %reservation.date,
            time = %reservation.time,
            party = %reservation.party,
            "Reservation booked"
        );
        self.reservations.push(reservation.clone());
        Ok(reservation)
    }

    #[must_use]
    pub fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Reservations on or after `today`.
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate) -> usize {
        self.reservations.iter().filter(|r| r.date >= today).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn request() -> ReservationRequest {
        ReservationRequest {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: "+1 555 0100".to_owned(),
            date: "2025-06-14".to_owned(),
            time: "19:30".to_owned(),
            guests: "4".to_owned(),
            table_preference: "window".to_owned(),
            special_requests: String::new(),
        }
    }

    #[test]
    fn test_service_slots() {
        let slots: Vec<String> = service_slots().map(|t| t.format("%H:%M").to_string()).collect();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().unwrap(), "11:00");
        assert_eq!(slots.last().unwrap(), "21:00");
        assert!(slots.contains(&"14:00".to_owned()));
        assert!(!slots.contains(&"14:30".to_owned()));
        assert!(!slots.contains(&"16:30".to_owned()));
    }

    #[test]
    fn test_valid_request() {
        let reservation = request().validate(today()).unwrap();
        assert_eq!(reservation.name, "Ada Lovelace");
        assert_eq!(reservation.party, PartySize::Guests(4));
        assert_eq!(reservation.table_preference, TablePreference::Window);
        assert_eq!(reservation.special_requests, None);
        assert_eq!(reservation.confirmation.len(), 8);
        assert_eq!(reservation.time_label(), "7:30 PM");
    }

    #[test]
    fn test_same_day_is_allowed() {
        let mut req = request();
        req.date = "2025-06-01".to_owned();
        assert!(req.validate(today()).is_ok());
    }

    #[test]
    fn test_past_date_rejected() {
        let mut req = request();
        req.date = "2025-05-31".to_owned();
        assert_eq!(
            req.validate(today()),
            Err(ReservationError::DateInPast(
                NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
            ))
        );
    }

    #[test]
    fn test_time_outside_service_rejected() {
        let mut req = request();
        req.time = "15:00".to_owned();
        assert!(matches!(
            req.validate(today()),
            Err(ReservationError::OutsideServiceHours(_))
        ));

        req.time = "7pm".to_owned();
        assert!(matches!(
            req.validate(today()),
            Err(ReservationError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut req = request();
        req.name = "  ".to_owned();
        assert_eq!(req.validate(today()), Err(ReservationError::EmptyName));

        let mut req = request();
        req.email = "not-an-email".to_owned();
        assert!(matches!(
            req.validate(today()),
            Err(ReservationError::InvalidEmail(_))
        ));

        let mut req = request();
        req.phone = String::new();
        assert_eq!(req.validate(today()), Err(ReservationError::EmptyPhone));
    }

    #[test]
    fn test_party_size_parsing() {
        assert_eq!("1".parse::<PartySize>().unwrap(), PartySize::Guests(1));
        assert_eq!("10+".parse::<PartySize>().unwrap(), PartySize::LargeEvent);
        assert!("0".parse::<PartySize>().is_err());
        assert!("11".parse::<PartySize>().is_err());
        assert_eq!(PartySize::options().count(), 11);
        assert_eq!(PartySize::Guests(1).to_string(), "1 Guest");
        assert_eq!(PartySize::LargeEvent.value(), "10+");
    }

    #[test]
    fn test_table_preference_defaults_to_any() {
        assert_eq!("".parse::<TablePreference>().unwrap(), TablePreference::Any);
        assert_eq!(
            "patio".parse::<TablePreference>().unwrap(),
            TablePreference::Patio
        );
        assert!("rooftop".parse::<TablePreference>().is_err());
    }

    #[test]
    fn test_special_requests_trimmed() {
        let mut req = request();
        req.special_requests = "  Anniversary dinner ".to_owned();
        let reservation = req.validate(today()).unwrap();
        assert_eq!(
            reservation.special_requests.as_deref(),
            Some("Anniversary dinner")
        );
    }

    #[test]
    fn test_book_counts_upcoming() {
        let mut book = ReservationBook::new();
        book.book(&request(), today()).unwrap();

        let mut bad = request();
        bad.guests = "abc".to_owned();
        assert!(book.book(&bad, today()).is_err());

        assert_eq!(book.len(), 1);
        assert_eq!(book.upcoming(today()), 1);
        let later = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(book.upcoming(later), 0);
    }
}
