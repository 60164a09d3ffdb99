//! Reservation types.
//!
//! A [`Reservation`] is a named record whose identifier is assigned by the
//! store on creation. Records built by the pipeline start out unsaved
//! (`id == None`) and are only ever observed with an id once a store has
//! persisted them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a reservation.
///
/// # Examples
///
/// ```
/// use reserva::ReservationId;
///
/// let id = ReservationId::from(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(format!("{id}"), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Returns the raw integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ReservationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named reservation.
///
/// # Examples
///
/// ```
/// use reserva::{Reservation, ReservationId};
///
/// let draft = Reservation::unsaved("Mahee");
/// assert_eq!(draft.id(), None);
/// assert!(!draft.is_persisted());
///
/// let saved = draft.with_id(ReservationId::from(1));
/// assert_eq!(saved.id(), Some(ReservationId::from(1)));
/// assert_eq!(saved.name(), "Mahee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    name: String,
}

impl Reservation {
    /// Creates a reservation that has not been persisted yet.
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a reservation as read back from a store.
    pub fn persisted(id: ReservationId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Returns a copy of this reservation carrying the given id.
    ///
    /// Used by stores when a create succeeds.
    #[must_use]
    pub fn with_id(self, id: ReservationId) -> Self {
        Self {
            id: Some(id),
            name: self.name,
        }
    }

    /// Returns the store-assigned id, if any.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Returns the reservation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true once a store has assigned an id.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Reservation(id={id}, name={})", self.name),
            None => write!(f, "Reservation(id=unset, name={})", self.name),
        }
    }
}
