use serde::{Deserialize, Deserializer};

/// Treats `null` the same way as a missing value - the backend sends `null`
/// instead of `[]` when there's nothing to list.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
