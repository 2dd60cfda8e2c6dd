#![allow(clippy::module_name_repetitions)]

/// Implement [`crate::db::Record`] for a schema whose key lives in an `id: Option<_>` field.
macro_rules! impl_record {
    ($schema:ty, $table:expr) => {
        impl $crate::db::Record for $schema {
            const TABLE_NAME: &'static str = $table;

            #[inline]
            fn id(&self) -> Option<$crate::db::RecordId> {
                self.id
            }

            #[inline]
            fn set_id(&mut self, id: $crate::db::RecordId) {
                self.id = Some(id);
            }
        }
    };
}

pub(crate) use impl_record;

pub mod album;
pub mod artist;
pub mod creator;
pub mod disc;
pub mod genre;
pub mod playlist;
pub mod profile;
pub mod song;

/// Every table of the catalogue.
pub const TABLES: [&str; 8] = [
    album::TABLE_NAME,
    artist::TABLE_NAME,
    creator::TABLE_NAME,
    disc::TABLE_NAME,
    genre::TABLE_NAME,
    playlist::TABLE_NAME,
    profile::TABLE_NAME,
    song::TABLE_NAME,
];
