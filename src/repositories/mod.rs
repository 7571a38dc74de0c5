use crate::storage::DbError;

pub type DbResult<T> = Result<T, DbError>;

pub mod profiles;
pub mod users;
