pub mod clock;
pub mod dispatcher;
pub mod ecs;
pub mod geo;
pub mod matching;
pub mod monitor;
pub mod runner;
pub mod scenario;
pub mod systems;
