use crate::storage::RepositoryError;

/// Refuses a delete while other rows still reference the entity.
///
/// Deletes never cascade: a provider with food listings, or a food listing
/// or receiver with claims, has to be emptied out first.
pub fn ensure_no_dependents(
    entity_type: &'static str,
    id: i64,
    dependent_table: &'static str,
    count: i64,
) -> Result<(), RepositoryError> {
    if count > 0 {
        Err(RepositoryError::HasDependents {
            entity_type,
            id: id.to_string(),
            dependent_table,
            count,
        })
    } else {
        Ok(())
    }
}
