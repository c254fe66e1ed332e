//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_identity_gateway;
mod in_memory_venue_repository;
mod postgres_venue_repository;

pub use http_identity_gateway::{HttpIdentityGateway, IdentityGatewayConfig};
pub use in_memory_venue_repository::InMemoryVenueRepository;
pub use postgres_venue_repository::PostgresVenueRepository;
