use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

use log::{debug, warn};

use crate::{
    catalog::{MusicGroup, error::CatalogError},
    domain::{album::Album, song::Song},
};

/// Main structure that implements all catalog logic
///
/// Songs are kept in insertion order; `index` only serves deduplication.
#[derive(Debug, Default)]
pub struct MusicCatalog {
    albums: HashMap<String, i32>,
    songs: Vec<Song>,
    index: HashSet<Song>,
}

impl MusicCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn album_year(&self, name: &str) -> Option<i32> {
        self.albums.get(name).copied()
    }

    pub fn albums(&self) -> impl Iterator<Item = Album> + '_ {
        self.albums
            .iter()
            .map(|(name, year)| Album::new(name.clone(), *year))
    }

    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    fn songs_of<'a>(&'a self, album: &'a str) -> impl Iterator<Item = &'a Song> {
        self.songs.iter().filter(move |s| s.belongs_to(album))
    }

    /// total duration per album, in order of the first song referencing it
    fn album_durations(&self) -> Vec<(&str, f64)> {
        let mut totals: Vec<(&str, DurationSum)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for song in &self.songs {
            let Some(album) = song.album() else {
                continue;
            };
            let pos = *positions.entry(album).or_insert_with(|| {
                totals.push((album, DurationSum::default()));
                totals.len() - 1
            });
            totals[pos].1.add(song.duration);
        }

        totals
            .into_iter()
            .map(|(album, sum)| (album, sum.total()))
            .collect()
    }
}

/// Neumaier compensated sum of durations
#[derive(Debug, Default, Clone, Copy)]
struct DurationSum {
    sum: f64,
    compensation: f64,
    /// uncompensated sum, used when the compensated one overflows to NaN
    simple: f64,
    count: usize,
}

impl DurationSum {
    fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
        self.simple += value;
        self.count += 1;
    }

    fn total(&self) -> f64 {
        let total = self.sum + self.compensation;
        if total.is_nan() && self.simple.is_infinite() {
            self.simple
        } else {
            total
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total() / self.count as f64)
    }
}

impl FromIterator<f64> for DurationSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::default();
        for value in iter {
            sum.add(value);
        }
        sum
    }
}

/// first element with the greatest key, any NaN ranking above every number
fn first_max_by_key<T>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> f64) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let k = key(&item);
        let k = if k.is_nan() { f64::NAN.abs() } else { k };
        match &best {
            Some((_, best_k)) if k.total_cmp(best_k) != Ordering::Greater => {}
            _ => best = Some((item, k)),
        }
    }
    best.map(|(item, _)| item)
}

impl MusicGroup for MusicCatalog {
    fn add_album(&mut self, name: &str, year: i32) {
        if let Some(previous) = self.albums.insert(name.to_string(), year) {
            debug!("album {name}: year {previous} replaced by {year}");
        } else {
            debug!("album {name} ({year}) added");
        }
    }

    fn add_song(
        &mut self,
        name: &str,
        album: Option<&str>,
        duration: f64,
    ) -> Result<(), CatalogError> {
        if let Some(album) = album {
            if !self.albums.contains_key(album) {
                warn!("rejecting song {name}: album {album} does not exist");
                return Err(CatalogError::InvalidReference {
                    song: name.to_string(),
                    album: album.to_string(),
                });
            }
        }

        let song = Song::new(name, album.map(str::to_string), duration);
        // a NaN duration never equals another, so such songs are never duplicates
        if duration.is_nan() {
            debug!("added {song}");
            self.songs.push(song);
        } else if self.index.insert(song.clone()) {
            debug!("added {song}");
            self.songs.push(song);
        } else {
            debug!("{song} already present");
        }
        Ok(())
    }

    fn ordered_song_names(&self) -> impl Iterator<Item = &str> {
        let mut names = self
            .songs
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.into_iter()
    }

    fn album_names(&self) -> impl Iterator<Item = &str> {
        self.albums.keys().map(String::as_str)
    }

    fn albums_in_year(&self, year: i32) -> impl Iterator<Item = &str> {
        self.albums
            .iter()
            .filter(move |(_, y)| **y == year)
            .map(|(name, _)| name.as_str())
    }

    fn count_songs(&self, album: &str) -> usize {
        self.songs_of(album).count()
    }

    fn count_songs_with_no_album(&self) -> usize {
        self.songs.iter().filter(|s| s.album.is_none()).count()
    }

    fn average_duration_of_songs(&self, album: &str) -> Option<f64> {
        self.songs_of(album)
            .map(|s| s.duration)
            .collect::<DurationSum>()
            .mean()
    }

    fn longest_song(&self) -> Option<&str> {
        first_max_by_key(&self.songs, |s| s.duration).map(|s| s.name.as_str())
    }

    fn longest_album(&self) -> Option<&str> {
        first_max_by_key(self.album_durations(), |(_, total)| *total).map(|(album, _)| album)
    }
}
