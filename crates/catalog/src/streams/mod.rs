pub mod movie_event_stream;

pub use movie_event_stream::movie_event_stream;
