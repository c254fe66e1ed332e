//! Application services and ports.

#![forbid(unsafe_code)]

mod access_resolver;
mod venue_ports;
mod venue_service;

pub use access_resolver::{AccessResolver, LocationVisibility, TableAccess};
pub use venue_ports::{
    CreateLocationInput, CreateTableInput, IdentityGateway, UpdateLocationInput,
    UpdateTableInput, VenueRepository,
};
pub use venue_service::VenueService;
