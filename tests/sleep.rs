use std::error::Error;
use kitbag::runtime::Reactor;
use kitbag::task::{sleep, sleep_until};
use kitbag::time::{Duration, Instant};

#[kitbag::test]
async fn just_sleep() -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    sleep(Duration::from_millis(50)).await;
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert_eq!(Reactor::current().pending_timers(), 0);
    Ok(())
}

#[kitbag::test]
async fn sleep_until_instant() -> Result<(), Box<dyn Error>> {
    let until = Instant::now() + Duration::from_millis(30);
    let woke = sleep_until(until).await;
    assert!(woke >= until);
    Ok(())
}

#[kitbag::test]
async fn await_durations_and_instants() -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    Duration::from_millis(20).await;
    (Instant::now() + Duration::from_millis(20)).await;
    assert!(start.elapsed() >= Duration::from_millis(40));
    Ok(())
}

#[kitbag::test]
async fn dropped_sleep_clears_its_timer() -> Result<(), Box<dyn Error>> {
    let mut pending = Box::pin(sleep(Duration::from_secs(60)));
    assert!(futures_lite::future::poll_once(&mut pending).await.is_none());
    assert_eq!(Reactor::current().pending_timers(), 1);
    drop(pending);
    assert_eq!(Reactor::current().pending_timers(), 0);
    Ok(())
}

#[test]
#[should_panic(expected = "inside an existing block_on")]
fn nested_block_on_panics() {
    kitbag::runtime::block_on(async {
        kitbag::runtime::block_on(async {});
    });
}
