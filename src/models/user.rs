use diesel::prelude::*;

/// User row as stored in the `users` table.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub class: String,
}

/// Column values for INSERT and full-replacement UPDATE.
///
/// The id is never part of this struct; the store assigns it on insert.
#[derive(Debug, Insertable, AsChangeset, Clone, PartialEq, Eq, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
    pub class: String,
}

impl NewUser {
    /// Attaches an id to the submitted values without re-reading the row.
    pub fn with_id(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            class: self.class,
        }
    }
}
