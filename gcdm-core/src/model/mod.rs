mod airport;
mod origin;
mod travel_rv;

pub use airport::Airport;
pub use origin::Origin;
pub use travel_rv::TravelRV;
