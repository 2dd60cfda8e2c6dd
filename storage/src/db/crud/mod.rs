pub mod album;
pub mod artist;
pub mod creator;
pub mod genre;
pub mod playlist;
pub mod song;
