//! Seed the catalogue with sample cafes.
//!
//! Sample rows carry no contributor, like cafes imported before
//! contribution tracking existed. Re-running the command skips names that
//! are already listed.

use thiserror::Error;

use coffee_wifi_web::db::{CafeRepository, RepositoryError, create_pool};
use coffee_wifi_web::models::NewCafe;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

struct Sample {
    name: &'static str,
    location: &'static str,
    map_url: &'static str,
    seats: &'static str,
    coffee_price: &'static str,
    has_toilet: bool,
    has_wifi: bool,
    has_sockets: bool,
    can_take_calls: bool,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "Science Gallery London",
        location: "London Bridge",
        map_url: "https://g.page/scigallerylon",
        seats: "50+",
        coffee_price: "£2.40",
        has_toilet: true,
        has_wifi: true,
        has_sockets: true,
        can_take_calls: false,
    },
    Sample {
        name: "Ace Hotel Lobby",
        location: "Shoreditch",
        map_url: "https://goo.gl/maps/ace-hotel-shoreditch",
        seats: "20-30",
        coffee_price: "£3.20",
        has_toilet: true,
        has_wifi: true,
        has_sockets: false,
        can_take_calls: true,
    },
    Sample {
        name: "Barbican Centre Foodhall",
        location: "Barbican",
        map_url: "https://goo.gl/maps/barbican-foodhall",
        seats: "50+",
        coffee_price: "£2.75",
        has_toilet: true,
        has_wifi: false,
        has_sockets: true,
        can_take_calls: true,
    },
];

/// Insert the sample cafes, skipping any that already exist.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or an insert fails for
/// a reason other than a duplicate name.
pub async fn run() -> Result<(), SeedError> {
    let database_url = super::database_url_from_env();
    let pool = create_pool(&database_url).await?;
    let cafes = CafeRepository::new(&pool);

    for sample in SAMPLES {
        let new_cafe = NewCafe {
            name: sample.name.to_owned(),
            map_url: sample.map_url.to_owned(),
            img_url: None,
            location: sample.location.to_owned(),
            seats: sample.seats.to_owned(),
            has_toilet: sample.has_toilet,
            has_wifi: sample.has_wifi,
            has_sockets: sample.has_sockets,
            can_take_calls: sample.can_take_calls,
            coffee_price: Some(sample.coffee_price.to_owned()),
            user_id: None,
        };

        match cafes.create(&new_cafe).await {
            Ok(cafe) => tracing::info!(name = %cafe.name, "Seeded cafe"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(name = %sample.name, "Already listed, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
