//! Explicit two-stage composition.
//!
//! ```text
//! Variables ──► [ renderer: Stage<Variables> ] ──► RenderedPrompt
//!                                                     │
//!          ChatResponse ◄── [ client: Stage<RenderedPrompt> ]
//! ```
//!
//! A [`Pipeline`] is itself a [`Stage`], so longer chains are built by
//! piping again. Stages are immutable after construction; running the same
//! pipeline from several tasks at once needs no coordination.
//!
//! ```rust
//! use promptpipe_core::{error::Result, pipeline::{FnStage, StageExt}};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let pipeline = FnStage::new(|n: u32| -> Result<u32> { Ok(n + 1) })
//!     .pipe(FnStage::new(|n: u32| -> Result<String> { Ok(n.to_string()) }));
//!
//! assert_eq!(pipeline.invoke(41).await?, "42");
//! # Ok(())
//! # }
//! ```
use crate::{error::Result, BoxFuture};

/// One step of a pipeline: consumes an `In`, produces `Self::Output`.
pub trait Stage<In>: Send + Sync
where
    In: Send + 'static,
{
    type Output: Send + 'static;

    fn run(&self, input: In) -> BoxFuture<'_, Result<Self::Output>>;
}

/// Two stages run in order; the output of `first` is the input of `second`.
///
/// Errors from either stage are returned as-is.
#[derive(Debug, Clone)]
pub struct Pipeline<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pipeline<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    /// Run both stages for one input. Alias for [`Stage::run`].
    pub async fn invoke<In>(&self, input: In) -> Result<B::Output>
    where
        In: Send + 'static,
        A: Stage<In>,
        B: Stage<A::Output>,
    {
        self.run(input).await
    }
}

impl<In, A, B> Stage<In> for Pipeline<A, B>
where
    In: Send + 'static,
    A: Stage<In>,
    B: Stage<A::Output>,
{
    type Output = B::Output;

    fn run(&self, input: In) -> BoxFuture<'_, Result<Self::Output>> {
        Box::pin(async move {
            let intermediate = self.first.run(input).await?;
            self.second.run(intermediate).await
        })
    }
}

/// Fluent composition for every stage.
pub trait StageExt<In>: Stage<In> + Sized
where
    In: Send + 'static,
{
    /// Feed this stage's output into `next`.
    fn pipe<B>(self, next: B) -> Pipeline<Self, B>
    where
        B: Stage<Self::Output>,
    {
        Pipeline::new(self, next)
    }
}

impl<In, S> StageExt<In> for S
where
    In: Send + 'static,
    S: Stage<In>,
{
}

/// Adapts a synchronous, fallible closure into a [`Stage`].
///
/// Handy for small transformations and for stubbing a stage in tests.
#[derive(Clone)]
pub struct FnStage<F>(F);

impl<F> FnStage<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<In, Out, F> Stage<In> for FnStage<F>
where
    In: Send + 'static,
    Out: Send + 'static,
    F: Fn(In) -> Result<Out> + Send + Sync,
{
    type Output = Out;

    fn run(&self, input: In) -> BoxFuture<'_, Result<Out>> {
        let result = (self.0)(input);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use futures_util::future::join_all;

    use super::*;
    use crate::error::PipeError;

    /// Passes its input through after a delay that shrinks as the input
    /// grows, so later invocations finish first.
    struct Delayed;

    impl Stage<u64> for Delayed {
        type Output = u64;

        fn run(&self, input: u64) -> BoxFuture<'_, Result<u64>> {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(20 - input)).await;
                Ok(input)
            })
        }
    }

    #[tokio::test]
    async fn stages_run_in_order() {
        let pipeline = FnStage::new(|s: String| -> Result<String> { Ok(format!("{s}-a")) })
            .pipe(FnStage::new(|s: String| -> Result<String> { Ok(format!("{s}-b")) }))
            .pipe(FnStage::new(|s: String| -> Result<usize> { Ok(s.len()) }));

        assert_eq!(pipeline.invoke("x".to_string()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn first_failure_short_circuits() {
        let calls = AtomicUsize::new(0);
        let second = FnStage::new(|n: u32| -> Result<u32> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(n)
        });
        let pipeline = FnStage::new(|_: u32| -> Result<u32> {
            Err(PipeError::MissingVariable { name: "x".into() })
        })
        .pipe(second);

        let err = pipeline.invoke(1).await.unwrap_err();
        assert!(matches!(err, PipeError::MissingVariable { ref name } if name == "x"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_failure_is_returned_unchanged() {
        let pipeline = FnStage::new(|n: u32| -> Result<u32> { Ok(n) }).pipe(FnStage::new(
            |_: u32| -> Result<u32> { Err(PipeError::InvalidRequest("nope".into())) },
        ));

        let err = pipeline.invoke(1).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid request: nope");
    }

    #[tokio::test]
    async fn shared_pipeline_keeps_concurrent_invocations_apart() {
        let pipeline =
            Delayed.pipe(FnStage::new(|n: u64| -> Result<String> { Ok(format!("item-{n}")) }));

        let results = join_all((0..16u64).map(|n| pipeline.invoke(n))).await;

        for (n, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), format!("item-{n}"));
        }
    }
}
