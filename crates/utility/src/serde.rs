pub mod date_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{
        de::{Error, IntoDeserializer},
        Deserialize as _, Deserializer,
    };

    /// Reads RFC 3339 timestamps as well as offset-less ones
    /// (`2024-05-01T10:00:00.123`), which the backend emits for its local
    /// date times. Offset-less values are taken as UTC.
    pub fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Ok(date_time) = DateTime::parse_from_rfc3339(&s) {
            return Ok(date_time.with_timezone(&Utc));
        }
        let naive_datetime = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(Error::custom)?;
        Ok(naive_datetime.and_utc())
    }

    pub fn deserialize_utc_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => {
                let date_time = deserialize_utc(s.as_str().into_deserializer())?;
                Ok(Some(date_time))
            }
            None => Ok(None),
        }
    }
}
