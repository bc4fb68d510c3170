//! Typed identifiers and the counters that hand them out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CapacityExceeded, CapacityKind};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_type!(
    /// Identifier of a registered driver.
    DriverId
);
id_type!(
    /// Identifier of a ride request.
    RiderId
);
id_type!(
    /// Identifier of a ledger entry.
    RideId
);

/// Monotonic counter producing raw ids starting at a configured base.
///
/// The sequence ends after handing out `u64::MAX`; further requests fail
/// instead of wrapping.
#[derive(Debug, Clone, Copy)]
pub struct IdSequence {
    base: u64,
    next: Option<u64>,
}

impl IdSequence {
    pub fn starting_at(base: u64) -> Self {
        Self {
            base,
            next: Some(base),
        }
    }

    /// The id the next call to [`IdSequence::advance`] will return.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        match self.next {
            Some(next) => next - self.base,
            None => (u64::MAX - self.base).saturating_add(1),
        }
    }

    /// Fails once every id after the base has been used.
    pub fn ensure_available(&self) -> Result<(), CapacityExceeded> {
        self.next.map(|_| ()).ok_or_else(|| self.exhausted())
    }

    /// Hands out the next id; the sequence ends at `u64::MAX` instead of wrapping.
    pub fn advance(&mut self) -> Result<u64, CapacityExceeded> {
        let id = self.next.ok_or_else(|| self.exhausted())?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    fn exhausted(&self) -> CapacityExceeded {
        CapacityExceeded {
            kind: CapacityKind::Ids,
            limit: usize::try_from(self.issued()).unwrap_or(usize::MAX),
        }
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
