use crate::core::{Address, Coordinates, PassPipeline, PassRecord};
use crate::utils::error::Result;
use std::time::Instant;

/// Progress of one run. Transitions only move forward and end in `Done`.
#[derive(Debug)]
pub enum FlyoverState {
    AwaitingAddress,
    AwaitingLocation(Address),
    AwaitingPasses(Coordinates),
    Done(Result<Vec<PassRecord>>),
}

impl FlyoverState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingAddress => "awaiting_address",
            Self::AwaitingLocation(_) => "awaiting_location",
            Self::AwaitingPasses(_) => "awaiting_passes",
            Self::Done(Ok(_)) => "done_success",
            Self::Done(Err(_)) => "done_failure",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Drives the address, location and pass lookups strictly one after another.
pub struct FlyoverEngine<P: PassPipeline> {
    pipeline: P,
}

impl<P: PassPipeline> FlyoverEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Performs the next lookup for `state` and returns the state that follows it.
    pub async fn step(&self, state: FlyoverState) -> FlyoverState {
        let started = Instant::now();
        let next = match state {
            FlyoverState::AwaitingAddress => match self.pipeline.resolve_address().await {
                Ok(address) => {
                    tracing::debug!("🌐 Public address: {}", address);
                    FlyoverState::AwaitingLocation(address)
                }
                Err(e) => FlyoverState::Done(Err(e)),
            },
            FlyoverState::AwaitingLocation(address) => {
                match self.pipeline.resolve_location(&address).await {
                    Ok(coords) => {
                        tracing::info!(
                            "📍 Located at lat {}, lon {}",
                            coords.latitude,
                            coords.longitude
                        );
                        FlyoverState::AwaitingPasses(coords)
                    }
                    Err(e) => FlyoverState::Done(Err(e)),
                }
            }
            FlyoverState::AwaitingPasses(coords) => {
                match self.pipeline.resolve_passes(&coords).await {
                    Ok(passes) => {
                        tracing::info!("🛰️ Received {} upcoming passes", passes.len());
                        FlyoverState::Done(Ok(passes))
                    }
                    Err(e) => FlyoverState::Done(Err(e)),
                }
            }
            done @ FlyoverState::Done(_) => return done,
        };
        tracing::debug!("Moved to {} after {:?}", next.name(), started.elapsed());
        next
    }

    pub async fn run(&self) -> Result<Vec<PassRecord>> {
        let started = Instant::now();
        let mut state = FlyoverState::AwaitingAddress;
        loop {
            state = match self.step(state).await {
                FlyoverState::Done(outcome) => {
                    match &outcome {
                        Ok(_) => {
                            tracing::debug!("Flyover lookup finished in {:?}", started.elapsed())
                        }
                        Err(e) => tracing::debug!("Flyover lookup stopped: {}", e),
                    }
                    return outcome;
                }
                next => next,
            };
        }
    }

    /// Runs the full chain and hands the single outcome to `on_complete`.
    pub async fn resolve_next_passes<F>(&self, on_complete: F)
    where
        F: FnOnce(Result<Vec<PassRecord>>),
    {
        on_complete(self.run().await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FlyoverError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct MockPipeline {
        fail_address: bool,
        fail_location: bool,
        address_calls: AtomicUsize,
        location_calls: AtomicUsize,
        pass_calls: AtomicUsize,
        seen_address: Mutex<Option<Address>>,
        seen_coordinates: Mutex<Option<Coordinates>>,
    }

    impl MockPipeline {
        fn failing_address() -> Self {
            Self {
                fail_address: true,
                ..Default::default()
            }
        }

        fn failing_location() -> Self {
            Self {
                fail_location: true,
                ..Default::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl PassPipeline for MockPipeline {
        async fn resolve_address(&self) -> Result<Address> {
            self.address_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_address {
                return Err(FlyoverError::HttpStatus {
                    url: "http://ip.test".to_string(),
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(Address::new("1.2.3.4"))
        }

        async fn resolve_location(&self, address: &Address) -> Result<Coordinates> {
            self.location_calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_address.lock().unwrap() = Some(address.clone());
            if self.fail_location {
                return Err(FlyoverError::transport("http://geo.test/1.2.3.4", "timed out"));
            }
            Ok(Coordinates::new(40.7, -74.0))
        }

        async fn resolve_passes(&self, coordinates: &Coordinates) -> Result<Vec<PassRecord>> {
            self.pass_calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_coordinates.lock().unwrap() = Some(*coordinates);
            Ok(vec![PassRecord::new(1577836800, 600)])
        }
    }

    #[tokio::test]
    async fn test_success_path_feeds_each_stage() {
        let engine = FlyoverEngine::new(MockPipeline::default());

        let passes = engine.run().await.unwrap();

        assert_eq!(passes, vec![PassRecord::new(1577836800, 600)]);
        let pipeline = engine.pipeline();
        assert_eq!(
            pipeline.seen_address.lock().unwrap().as_ref(),
            Some(&Address::new("1.2.3.4"))
        );
        assert_eq!(
            *pipeline.seen_coordinates.lock().unwrap(),
            Some(Coordinates::new(40.7, -74.0))
        );
    }

    #[tokio::test]
    async fn test_address_failure_short_circuits() {
        let engine = FlyoverEngine::new(MockPipeline::failing_address());

        let err = engine.run().await.unwrap_err();

        match err {
            FlyoverError::HttpStatus { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        let pipeline = engine.pipeline();
        assert_eq!(pipeline.address_calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.location_calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.pass_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_location_failure_skips_pass_stage() {
        let engine = FlyoverEngine::new(MockPipeline::failing_location());

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, FlyoverError::Transport { ref message, .. } if message == "timed out"));
        assert_eq!(engine.pipeline().location_calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.pipeline().pass_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_callback_receives_passes() {
        let engine = FlyoverEngine::new(MockPipeline::default());
        let mut received = None;

        tokio_test::block_on(engine.resolve_next_passes(|outcome| received = Some(outcome)));

        let passes = received.expect("callback not invoked").unwrap();
        assert_eq!(passes, vec![PassRecord::new(1577836800, 600)]);
    }

    #[test]
    fn test_callback_receives_first_error() {
        let engine = FlyoverEngine::new(MockPipeline::failing_address());
        let mut calls = 0;
        let mut received = None;

        tokio_test::block_on(engine.resolve_next_passes(|outcome| {
            calls += 1;
            received = Some(outcome);
        }));

        assert_eq!(calls, 1);
        assert!(matches!(
            received,
            Some(Err(FlyoverError::HttpStatus { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let engine = FlyoverEngine::new(MockPipeline::default());

        let first = engine.run().await.unwrap();
        let second = engine.run().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(engine.pipeline().address_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_steps_only_move_forward() {
        let engine = FlyoverEngine::new(MockPipeline::default());
        let mut visited = Vec::new();
        let mut state = FlyoverState::AwaitingAddress;

        while !state.is_terminal() {
            visited.push(state.name());
            state = engine.step(state).await;
        }
        visited.push(state.name());

        assert_eq!(
            visited,
            vec![
                "awaiting_address",
                "awaiting_location",
                "awaiting_passes",
                "done_success"
            ]
        );

        // A finished run stays finished without touching the pipeline again.
        let state = engine.step(state).await;
        assert_eq!(state.name(), "done_success");
        assert_eq!(engine.pipeline().pass_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_public_address_is_not_logged_at_info() {
        let engine = FlyoverEngine::new(MockPipeline::default());

        engine.run().await.unwrap();

        assert!(logs_contain("1.2.3.4"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("1.2.3.4"))
                .find(|line| !line.contains("DEBUG"))
            {
                Some(line) => Err(format!("address logged above debug: {}", line)),
                None => Ok(()),
            }
        });
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failure_is_not_logged_as_warning() {
        let engine = FlyoverEngine::new(MockPipeline::failing_address());

        engine.run().await.unwrap_err();

        assert!(logs_contain("Flyover lookup stopped"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .find(|line| line.contains("WARN") || line.contains("ERROR"))
            {
                Some(line) => Err(format!("unexpected warning: {}", line)),
                None => Ok(()),
            }
        });
    }
}
