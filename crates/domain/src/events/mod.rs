pub mod movie_events;

pub use movie_events::MovieEvent;
