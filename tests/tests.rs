use std::time::Duration;

use async_std::prelude::*;
use async_std::task;

use async_channel::bounded;

use cancel_token::prelude::*;
use cancel_token::CancelSource;

#[test]
fn smoke() {
    task::block_on(async {
        let (sender, receiver) = bounded::<i32>(10);
        let source = CancelSource::new();
        let task = task::spawn({
            let token = source.token();
            let receiver = receiver.clone();
            async move {
                let mut xs = Vec::new();
                let mut stream = receiver.until(token);
                while let Some(Ok(x)) = stream.next().await {
                    xs.push(x)
                }
                xs
            }
        });
        sender.send(1).await.unwrap();
        sender.send(2).await.unwrap();
        sender.send(3).await.unwrap();

        task::sleep(Duration::from_millis(250)).await;
        source.cancel(Some("enough"));
        task::sleep(Duration::from_millis(250)).await;

        sender.send(4).await.unwrap();
        sender.send(5).await.unwrap();
        sender.send(6).await.unwrap();
        assert_eq!(task.await, vec![1, 2, 3]);
    })
}

#[test]
fn cancel_is_single_fire() {
    let source = CancelSource::new();
    let token = source.token();
    assert!(!token.is_cancelled());
    assert!(token.checked().is_ok());

    source.cancel(Some("first"));
    source.cancel(Some("second"));
    source.cancel(None);

    assert!(token.is_cancelled());
    assert_eq!(token.reason().unwrap().message(), Some("first"));
    assert_eq!(token.checked().unwrap_err().message(), Some("first"));
}

#[test]
fn cancel_renders_reason() {
    let source = CancelSource::new();
    source.cancel(None);
    assert_eq!(
        source.token().reason().unwrap().to_string(),
        "Operation canceled"
    );

    let source = CancelSource::new();
    source.cancel(Some("shutting down"));
    assert_eq!(
        source.token().reason().unwrap().to_string(),
        "Operation canceled: shutting down"
    );
}

#[test]
fn token_resolves_with_the_reason() {
    task::block_on(async {
        let source = CancelSource::new();
        let token = source.token();
        task::spawn(async move {
            task::sleep(Duration::from_millis(50)).await;
            source.cancel(Some("no longer needed"));
        });
        let cancel = token.await;
        assert_eq!(cancel.message(), Some("no longer needed"));
    })
}

#[test]
fn cancelled_token_resolves_at_first_poll() {
    task::block_on(async {
        let source = CancelSource::new();
        source.cancel(Some("early"));
        let cancel = source.token().await;
        assert_eq!(cancel.message(), Some("early"));
    })
}

#[test]
fn token_without_a_fire_never_resolves() {
    task::block_on(async {
        let source = CancelSource::new();
        let token = source.token();
        // Dropping the source is not a cancellation.
        drop(source);
        let outcome = async_std::future::timeout(Duration::from_millis(100), token).await;
        assert!(outcome.is_err());
    })
}

#[test]
fn every_token_observes_the_fire() {
    task::block_on(async {
        let source = CancelSource::new();
        let one = source.token();
        let two = one.clone();
        let three = source.token();
        source.cancel(Some("fan out"));
        for token in vec![one, two, three] {
            assert_eq!(token.await.message(), Some("fan out"));
        }
    })
}

#[test]
fn until_prefers_the_cancellation() {
    task::block_on(async {
        let source = CancelSource::new();
        let token = source.token();
        task::spawn(async move {
            task::sleep(Duration::from_millis(50)).await;
            source.cancel(Some("give up"));
        });
        let outcome = task::sleep(Duration::from_secs(60)).until(token).await;
        assert_eq!(outcome.unwrap_err().message(), Some("give up"));
    })
}

#[test]
fn until_passes_the_value_through() {
    task::block_on(async {
        let source = CancelSource::new();
        let token = source.token();
        let value = async { 42 }.until(token).await;
        assert_eq!(value.unwrap(), 42);
        // A fire after completion has nobody left to notify.
        source.cancel(None);
    })
}

#[test]
fn stream_ends_after_the_cancel_surfaces() {
    task::block_on(async {
        let (sender, receiver) = bounded::<i32>(10);
        let source = CancelSource::new();
        sender.send(1).await.unwrap();
        source.cancel(Some("enough"));

        let mut stream = receiver.until(source.token());
        // The token wins the poll race even though an item is buffered.
        let first = stream.next().await.unwrap();
        assert_eq!(first.unwrap_err().message(), Some("enough"));
        assert!(stream.next().await.is_none());
    })
}

#[tokio::test]
async fn works_on_tokio() {
    let source = CancelSource::new();
    let token = source.token();
    source.cancel(Some("done"));
    assert_eq!(token.await.message(), Some("done"));
}
