use std::time::Duration;

use domain::MovieEvent;
use tokio_stream::Stream;

/// Infinite stream of events for `movie_id`, one per `cadence`.
///
/// The timer for the next event only starts once the consumer asks for it,
/// so a slow consumer delays ticks rather than losing or queueing them, and
/// consecutive events are always at least `cadence` apart. Dropping the
/// stream drops the pending timer; nothing is emitted afterwards.
pub fn movie_event_stream(
    movie_id: String,
    cadence: Duration,
) -> impl Stream<Item = MovieEvent> + Send + 'static {
    async_stream::stream! {
        loop {
            tokio::time::sleep(cadence).await;
            yield MovieEvent::now(movie_id.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;
    use tokio_test::{assert_pending, task};

    #[tokio::test(start_paused = true)]
    async fn test_first_event_waits_one_cadence() {
        let mut stream = task::spawn(movie_event_stream("7".to_string(), Duration::from_secs(1)));

        assert_pending!(stream.poll_next());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert_pending!(stream.poll_next());

        tokio::time::advance(Duration::from_millis(1)).await;
        match stream.poll_next() {
            std::task::Poll::Ready(Some(event)) => assert_eq!(event.movie_id, "7"),
            other => panic!("expected an event, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_does_not_end() {
        let events: Vec<MovieEvent> = movie_event_stream("7".to_string(), Duration::from_secs(1))
            .take(50)
            .collect()
            .await;

        assert_eq!(events.len(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_streams_are_independent() {
        let mut fast = Box::pin(movie_event_stream("a".to_string(), Duration::from_millis(10)));
        let slow = movie_event_stream("b".to_string(), Duration::from_secs(60));
        tokio::pin!(slow);

        assert_eq!(fast.next().await.unwrap().movie_id, "a");
        assert_eq!(fast.next().await.unwrap().movie_id, "a");
        assert_eq!(slow.next().await.unwrap().movie_id, "b");
    }
}
