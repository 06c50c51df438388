use crate::catalog::error::CatalogError;

pub mod error;
pub mod operations;

/// Queries and mutations over a collection of albums and songs.
///
/// Every query is a pure function of the current contents. Queries about an
/// album nobody added return empty results instead of failing.
pub trait MusicGroup {
    /// Adds an album, or overwrites the year of an existing one
    fn add_album(&mut self, name: &str, year: i32);

    /// Adds a song. Fails if `album` is present but was never added;
    /// in that case nothing is inserted.
    fn add_song(
        &mut self,
        name: &str,
        album: Option<&str>,
        duration: f64,
    ) -> Result<(), CatalogError>;

    /// All song names in ascending order, equal names included once per song
    fn ordered_song_names(&self) -> impl Iterator<Item = &str>;

    /// All album names in no particular order
    fn album_names(&self) -> impl Iterator<Item = &str>;

    fn albums_in_year(&self, year: i32) -> impl Iterator<Item = &str>;

    fn count_songs(&self, album: &str) -> usize;

    fn count_songs_with_no_album(&self) -> usize;

    /// `None` when the album has no songs
    fn average_duration_of_songs(&self, album: &str) -> Option<f64>;

    fn longest_song(&self) -> Option<&str>;

    /// Album whose songs add up to the longest total duration.
    /// Albums without songs are never returned.
    fn longest_album(&self) -> Option<&str>;
}
