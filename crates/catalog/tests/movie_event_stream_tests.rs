use std::sync::Arc;
use std::time::Duration;

use catalog::{movie_event_stream, InMemoryMovieRepository, MovieService};
use domain::MovieEvent;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

const CADENCE: Duration = Duration::from_millis(50);

#[tokio::test]
async fn events_carry_subject_and_are_spaced_by_cadence() {
    let events: Vec<MovieEvent> = movie_event_stream("X".to_string(), CADENCE)
        .take(3)
        .collect()
        .await;

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|event| event.movie_id == "X"));

    for pair in events.windows(2) {
        let gap = pair[1].date - pair[0].date;
        assert!(gap > chrono::Duration::zero());
        // Wall clock stamps may round down by a millisecond
        assert!(gap >= chrono::Duration::milliseconds(49), "gap was {}", gap);
    }
}

#[tokio::test]
async fn cancelled_subscription_emits_nothing_further() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let consumer = tokio::spawn(async move {
        let mut stream = Box::pin(movie_event_stream("X".to_string(), CADENCE));
        while let Some(event) = stream.next().await {
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    let first = rx.recv().await.unwrap();
    assert_eq!(first.movie_id, "X");

    consumer.abort();
    let _ = consumer.await;
    while rx.try_recv().is_ok() {}

    tokio::time::sleep(CADENCE * 3).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn service_streams_events_for_unknown_movies() {
    let service = MovieService::new(Arc::new(InMemoryMovieRepository::new()), CADENCE);

    let events: Vec<MovieEvent> = service.stream_movie_events("no-such-movie").take(2).collect().await;

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| event.movie_id == "no-such-movie"));
}

#[tokio::test]
async fn slow_consumer_does_not_receive_a_backlog() {
    let mut stream = Box::pin(movie_event_stream("X".to_string(), CADENCE));

    stream.next().await.unwrap();
    tokio::time::sleep(CADENCE * 4).await;

    let started = tokio::time::Instant::now();
    stream.next().await.unwrap();

    assert!(started.elapsed() >= CADENCE - Duration::from_millis(5));
}
