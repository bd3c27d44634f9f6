//! The simulation loop.
//!
//! A [`Driver`] owns the current generation and repeats three things in
//! order: hand the rendered text to a [`Renderer`], wait for the configured
//! delay, compute the next generation. The wait is the only await point.
//!
//! Everything runs on one task. The driver does not know about any
//! particular runtime or display; the front end provides both.

use crate::{render::Viewport, world::World};
use log::{debug, trace};
use std::{
    cell::Cell,
    convert::Infallible,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
    time::Duration,
};

/// Driver status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The driver renders and steps whenever its loop is polled.
    Running,
    /// The driver has been stopped, and will not step again.
    Stopped,
}

/// A flag to stop a [`Driver`] from outside its loop.
///
/// Cloning gives another handle to the same flag.
/// The loop checks it before and after every wait.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// What the driver shows for one generation.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// The generation number, starting from `0`.
    pub generation: u64,
    /// The generation itself.
    pub world: &'a World,
    /// The rendered text, already clipped by the viewport.
    pub text: &'a str,
}

impl Frame<'_> {
    /// Number of living cells in the whole world, not only in the viewport.
    pub fn population(&self) -> usize {
        self.world.population()
    }
}

/// A display surface.
pub trait Renderer {
    type Error;

    /// Shows one generation.
    fn render(&mut self, frame: Frame<'_>) -> Result<(), Self::Error>;
}

/// Any closure taking a [`Frame`] is an infallible renderer.
impl<F: FnMut(Frame<'_>)> Renderer for F {
    type Error = Infallible;

    fn render(&mut self, frame: Frame<'_>) -> Result<(), Self::Error> {
        self(frame);
        Ok(())
    }
}

/// A timer.
pub trait Delay {
    type Sleep: Future<Output = ()>;

    /// A future that completes after `duration`.
    fn sleep(&mut self, duration: Duration) -> Self::Sleep;
}

impl<F, S> Delay for F
where
    F: FnMut(Duration) -> S,
    S: Future<Output = ()>,
{
    type Sleep = S;

    fn sleep(&mut self, duration: Duration) -> Self::Sleep {
        self(duration)
    }
}

/// Returns `Pending` exactly once, waking itself.
///
/// Used instead of the timer when the delay is zero, so that the loop
/// still gives other tasks a chance to run.
#[derive(Debug, Default)]
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// The simulation driver.
///
/// A new driver is [`Running`](Status::Running). It becomes
/// [`Stopped`](Status::Stopped) when its [`StopHandle`] is used, when the
/// renderer fails, or when the generation limit is reached; a stopped
/// driver never steps again.
#[derive(Debug)]
pub struct Driver {
    /// The current generation.
    world: World,

    /// Number of the current generation.
    generation: u64,

    /// The pause between two generations.
    delay: Duration,

    /// Clip of the rendered region.
    viewport: Viewport,

    /// Maximal number of generations to render in one [`run`](Driver::run).
    ///
    /// `None` means no limit.
    generations: Option<u64>,

    stop: StopHandle,
}

impl Driver {
    pub fn new(world: World, delay: Duration) -> Self {
        Driver {
            world,
            generation: 0,
            delay,
            viewport: Viewport::default(),
            generations: None,
            stop: StopHandle::new(),
        }
    }

    /// Sets the viewport.
    pub fn set_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets the generation limit.
    pub fn set_generations<T: Into<Option<u64>>>(mut self, generations: T) -> Self {
        self.generations = generations.into();
        self
    }

    /// A handle to stop this driver.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn status(&self) -> Status {
        if self.stop.is_stopped() {
            Status::Stopped
        } else {
            Status::Running
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of the current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The current generation as text, clipped by the viewport.
    pub fn text(&self) -> String {
        self.world.render_view(&self.viewport)
    }

    /// Runs the loop until the driver stops.
    ///
    /// Returns the number of generations rendered by this call.
    /// A renderer error stops the driver and is returned as is.
    pub async fn run<T, D>(&mut self, renderer: &mut T, timer: &mut D) -> Result<u64, T::Error>
    where
        T: Renderer + ?Sized,
        D: Delay + ?Sized,
    {
        if self.stop.is_stopped() {
            return Ok(0);
        }
        debug!(
            "Starting at generation {} with {} cells, delay {:?}",
            self.generation,
            self.world.population(),
            self.delay
        );

        let mut rendered = 0;
        let result = loop {
            let text = self.text();
            let frame = Frame {
                generation: self.generation,
                world: &self.world,
                text: &text,
            };
            if let Err(e) = renderer.render(frame) {
                break Err(e);
            }
            rendered += 1;
            trace!(
                "Generation {}: {} cells in {:?}",
                self.generation,
                self.world.population(),
                self.world.bbox()
            );

            if self.generations.map_or(false, |limit| rendered >= limit) {
                break Ok(rendered);
            }

            if self.stop.is_stopped() {
                break Ok(rendered);
            }
            if self.delay.is_zero() {
                YieldNow::default().await;
            } else {
                timer.sleep(self.delay).await;
            }
            if self.stop.is_stopped() {
                break Ok(rendered);
            }

            self.world.step();
            self.generation += 1;
        };

        self.stop.stop();
        debug!("Stopped at generation {}", self.generation);
        result
    }
}
