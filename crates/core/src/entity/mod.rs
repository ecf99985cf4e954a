// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, hash, marker::PhantomData, str::FromStr};

use ulid::Ulid;

///////////////////////////////////////////////////////////////////////
// EntityUid
///////////////////////////////////////////////////////////////////////

/// Opaque, universally unique identifier of an entity.
///
/// Encoded as a 26 character ULID string. The encoded form is
/// lexicographically sortable by creation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityUid(Ulid);

pub type DecodeError = ulid::DecodeError;

impl EntityUid {
    pub const STR_LEN: usize = 26;

    #[must_use]
    pub fn random() -> Self {
        Self(Ulid::new())
    }

    pub fn decode_from(encoded: &str) -> Result<Self, DecodeError> {
        Ulid::from_string(encoded).map(Self)
    }

    #[must_use]
    pub fn encode_to_string(&self) -> String {
        self.0.to_string()
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for EntityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntityUid {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_from(s)
    }
}

///////////////////////////////////////////////////////////////////////
// EntityUidTyped
///////////////////////////////////////////////////////////////////////

/// Marker for the different kinds of entities.
pub trait EntityType: 'static {}

/// An [`EntityUid`] that is tagged with the type of the entity.
pub struct EntityUidTyped<T: EntityType> {
    untyped: EntityUid,
    typed_marker: PhantomData<T>,
}

impl<T: EntityType> EntityUidTyped<T> {
    #[must_use]
    pub const fn from_untyped(untyped: EntityUid) -> Self {
        Self {
            untyped,
            typed_marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn into_untyped(self) -> EntityUid {
        self.untyped
    }

    #[must_use]
    pub fn random() -> Self {
        Self::from_untyped(EntityUid::random())
    }
}

impl<T: EntityType> AsRef<EntityUid> for EntityUidTyped<T> {
    fn as_ref(&self) -> &EntityUid {
        &self.untyped
    }
}

impl<T: EntityType> Clone for EntityUidTyped<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: EntityType> Copy for EntityUidTyped<T> {}

impl<T: EntityType> PartialEq for EntityUidTyped<T> {
    fn eq(&self, other: &Self) -> bool {
        self.untyped == other.untyped
    }
}

impl<T: EntityType> Eq for EntityUidTyped<T> {}

impl<T: EntityType> hash::Hash for EntityUidTyped<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.untyped.hash(state);
    }
}

impl<T: EntityType> fmt::Debug for EntityUidTyped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.untyped, f)
    }
}

impl<T: EntityType> fmt::Display for EntityUidTyped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.untyped, f)
    }
}

impl<T: EntityType> FromStr for EntityUidTyped<T> {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::from_untyped)
    }
}

///////////////////////////////////////////////////////////////////////
// Entity
///////////////////////////////////////////////////////////////////////

/// An identified body of data.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity<T: EntityType, B> {
    pub uid: EntityUidTyped<T>,
    pub body: B,
}

impl<T: EntityType, B> Entity<T, B> {
    pub fn new(uid: impl Into<EntityUidTyped<T>>, body: impl Into<B>) -> Self {
        Self {
            uid: uid.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests;
