pub mod cancellation;
pub mod driver_request;
pub mod dropoff;
pub mod pickup;
pub mod rider_request;
