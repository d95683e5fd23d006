//! Startup seed data for local and demo runs.

use domain::{Beer, BeerStyle, Movie, PageRequest};
use tracing::info;

use crate::criteria::BeerCriteria;
use crate::repositories::{BeerRepository, MovieRepository};
use crate::CatalogError;

const MOVIE_TITLES: [&str; 5] = [
    "Silence of the Lambdas",
    "Enter the Mono<Void>",
    "Back to the Future",
    "Meet the Fluxes",
    "Lord of the Fluxes",
];

/// Replace every stored movie with the demo titles
pub async fn seed_movies(repository: &dyn MovieRepository) -> Result<Vec<Movie>, CatalogError> {
    repository.delete_all().await?;

    let mut saved = Vec::with_capacity(MOVIE_TITLES.len());
    for title in MOVIE_TITLES {
        saved.push(repository.save(Movie::new(title)).await?);
    }

    info!("Seeded {} movies", saved.len());
    Ok(saved)
}

fn seed_beers_catalog() -> Vec<Beer> {
    vec![
        Beer::new("Mango Bobs", BeerStyle::Ale, "0631234200036", 12.95).with_quantity_on_hand(122),
        Beer::new("Galaxy Cat", BeerStyle::PaleAle, "9122089364369", 11.95).with_quantity_on_hand(144),
        Beer::new("No Hammers On The Bar", BeerStyle::Wheat, "0083783375213", 10.95).with_quantity_on_hand(88),
        Beer::new("Blessed", BeerStyle::Stout, "4666337557578", 13.95).with_quantity_on_hand(57),
        Beer::new("Adjunct Trail", BeerStyle::Stout, "8380495518610", 14.95).with_quantity_on_hand(31),
        Beer::new("Very GGGreenn", BeerStyle::Ipa, "5677465691934", 12.50).with_quantity_on_hand(96),
        Beer::new("Double Barrel Hunahpu's", BeerStyle::Stout, "5463533082885", 19.95).with_quantity_on_hand(12),
        Beer::new("Very Hazy", BeerStyle::Ipa, "5339741428398", 12.95).with_quantity_on_hand(70),
        Beer::new("SR-71", BeerStyle::Stout, "1726923962766", 15.95).with_quantity_on_hand(24),
        Beer::new("Pliny the Younger", BeerStyle::Ipa, "8484957731774", 18.95).with_quantity_on_hand(6),
        Beer::new("Blessed Porter", BeerStyle::Porter, "6266328524787", 11.50).with_quantity_on_hand(63),
        Beer::new("Cactus Gose", BeerStyle::Gose, "7490217802727", 10.50).with_quantity_on_hand(40),
        Beer::new("Pilsner Urquell", BeerStyle::Pilsner, "8579613295827", 8.95).with_quantity_on_hand(210),
        Beer::new("Lakefront Lager", BeerStyle::Lager, "2318301340601", 8.50).with_quantity_on_hand(180),
        Beer::new("Farmhouse Saison", BeerStyle::Saison, "9401790633828", 13.50).with_quantity_on_hand(35),
    ]
}

/// Load the demo beer catalog, but only into an empty store.
/// Returns how many beers were inserted.
pub async fn seed_beers(repository: &dyn BeerRepository) -> Result<usize, CatalogError> {
    let existing = repository
        .find(&BeerCriteria::All, PageRequest { page_number: 0, page_size: 1 })
        .await?;
    if !existing.is_empty() {
        info!("Beer store already populated, skipping seed");
        return Ok(0);
    }

    let beers = seed_beers_catalog();
    let count = beers.len();
    for beer in beers {
        repository.save(beer).await?;
    }

    info!("Seeded {} beers", count);
    Ok(count)
}
