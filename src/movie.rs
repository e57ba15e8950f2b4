//! Movie records shown by the carousel.

/// One movie: a poster, a backdrop, and the metadata shown on the card.
/// Immutable once handed to the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub poster_url: String,
    pub backdrop_url: String,
    /// Genre chips, rendered in order.
    pub tags: Vec<String>,
    /// 0.0 to 10.0, rendered as a five-star row.
    pub rating: f32,
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        poster_url: impl Into<String>,
        backdrop_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            poster_url: poster_url.into(),
            backdrop_url: backdrop_url.into(),
            tags: Vec::new(),
            rating: 0.0,
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn rating(mut self, rating: f32) -> Self {
        self.rating = rating.clamp(0.0, 10.0);
        self
    }
}

/// The catalog the demo binaries scroll through.
pub fn demo_catalog() -> Vec<Movie> {
    vec![
        Movie::new(
            "Good Boys",
            "https://image.tmdb.org/t/p/w500/sbEveSpngZomPdMs2c1DVWVrNUT.jpg",
            "https://image.tmdb.org/t/p/w780/o6VLAuIjsXnfCOMCbtnmyJscHhA.jpg",
        )
        .tag("Comedy")
        .tag("Adventure")
        .rating(9.0),
        Movie::new(
            "Joker",
            "https://image.tmdb.org/t/p/w500/udDclJoHjfjb8Ekgsd4FDteOkCU.jpg",
            "https://image.tmdb.org/t/p/w780/n6bUvigpRFqSwmPp1m2YADdbRBc.jpg",
        )
        .tag("Crime")
        .tag("Drama")
        .tag("Thriller")
        .rating(8.5),
        Movie::new(
            "The Hustle",
            "https://image.tmdb.org/t/p/w500/qibqW0rS4F9mLsJJGKPcRc5lJhh.jpg",
            "https://image.tmdb.org/t/p/w780/rYRS5BLulTgHlAbqXT2RKQHv1jz.jpg",
        )
        .tag("Comedy")
        .tag("Crime")
        .rating(7.0),
        Movie::new(
            "Aladdin",
            "https://image.tmdb.org/t/p/w500/3iYQTLGoy7QnjcUYRJy4YrAgGvp.jpg",
            "https://image.tmdb.org/t/p/w780/v4yVTbbl8dE1UP2dWu5CLyaXOku.jpg",
        )
        .tag("Adventure")
        .tag("Fantasy")
        .tag("Family")
        .rating(8.0),
        Movie::new(
            "Rocketman",
            "https://image.tmdb.org/t/p/w500/svIDTNUoajS8dLEo7EosxvyAsgJ.jpg",
            "https://image.tmdb.org/t/p/w780/ajPlJwSyNhGbDEEdpZd0AfRx4KC.jpg",
        )
        .tag("Music")
        .tag("Drama")
        .rating(7.5),
    ]
}
