mod setup;

pub use world::E2eWorld;
