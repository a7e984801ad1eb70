use std::{cmp::Ordering, fmt, hash, marker::PhantomData, str::FromStr};

use serde::{Deserialize, Serialize};

pub trait HasId {
    type IdType;
}

/// Identifier of a `T`, serialized as the bare raw value. `Id<Tour>` and
/// `Id<KeyPoint>` share an `i64` representation but do not mix.
#[derive(Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "T::IdType: Serialize",
        deserialize = "T::IdType: Deserialize<'de>"
    )
)]
pub struct Id<T: HasId> {
    value: T::IdType,
    #[serde(skip)]
    kind: PhantomData<fn() -> T>,
}

impl<T: HasId> Id<T> {
    pub fn new(value: T::IdType) -> Self {
        Self {
            value,
            kind: PhantomData,
        }
    }
}

impl<T: HasId> Id<T>
where
    T::IdType: Clone,
{
    pub fn raw(&self) -> T::IdType {
        self.value.clone()
    }
}

pub trait IdWrapper<T: HasId>
where
    T::IdType: Clone,
{
    type ResultWrapper<R>;

    fn raw(self) -> Self::ResultWrapper<T::IdType>;
}

impl<T: HasId> IdWrapper<T> for Option<Id<T>>
where
    T::IdType: Clone,
{
    type ResultWrapper<R> = Option<R>;

    fn raw(self) -> Self::ResultWrapper<T::IdType> {
        self.map(|id| id.raw())
    }
}

impl<T: HasId> IdWrapper<T> for &[Id<T>]
where
    T::IdType: Clone,
{
    type ResultWrapper<R> = Vec<R>;

    fn raw(self) -> Self::ResultWrapper<T::IdType> {
        self.iter().map(|id| id.raw()).collect()
    }
}

impl<T: HasId> FromStr for Id<T>
where
    T::IdType: FromStr,
{
    type Err = <T::IdType as FromStr>::Err;

    /// Surrounding whitespace is ignored, as in path segments or env values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self::new)
    }
}

impl<T: HasId> fmt::Debug for Id<T>
where
    T::IdType: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.value)
    }
}

impl<T: HasId> fmt::Display for Id<T>
where
    T::IdType: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: HasId> Clone for Id<T>
where
    T::IdType: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.raw())
    }
}

impl<T: HasId> Copy for Id<T> where T::IdType: Copy {}

impl<T: HasId> PartialEq for Id<T>
where
    T::IdType: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: HasId> Eq for Id<T> where T::IdType: Eq {}

impl<T: HasId> hash::Hash for Id<T>
where
    T::IdType: hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: HasId> PartialOrd for Id<T>
where
    T::IdType: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: HasId> Ord for Id<T>
where
    T::IdType: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    impl HasId for Thing {
        type IdType = i64;
    }

    #[test]
    fn serializes_as_raw_value() {
        let id: Id<Thing> = Id::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: Id<Thing> = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn parses_from_path_segment() {
        let id: Id<Thing> = " 7 ".parse().unwrap();
        assert_eq!(id.raw(), 7);
        assert!("seven".parse::<Id<Thing>>().is_err());
    }

    #[test]
    fn unwraps_collections() {
        let ids = vec![Id::<Thing>::new(1), Id::new(2)];
        assert_eq!(ids.as_slice().raw(), vec![1, 2]);
        assert_eq!(Some(Id::<Thing>::new(3)).raw(), Some(3));
    }
}
