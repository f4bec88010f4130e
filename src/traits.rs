//! Collaborator capabilities consumed by the metric registry.
//!
//! The registry never constructs or stores metrics itself; it delegates to
//! these interfaces. [`FamilyFactory`] produces an unconfigured builder,
//! [`FamilyRegistry`] turns a configured builder into a live family, and
//! [`FamilyHandle`] adds labeled instances to that family. The in-crate
//! [`backend`](crate::backend) module implements all three; alternative
//! backends only need to provide the same capabilities.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Result;
use crate::labels::LabelSet;
use crate::types::{MetricKind, MetricValue};

/// Contract every metric instance type fulfils.
pub trait Metric: Sized + Send + Sync + 'static {
    /// Backend-specific construction arguments, forwarded only on the first
    /// creation of an instance (e.g. histogram bucket boundaries). `()` for
    /// kinds with nothing to configure.
    type Args: Send + Sync;

    /// Which kind of time series this instance produces.
    const KIND: MetricKind;

    /// Construct an instance from its arguments.
    ///
    /// Rejecting malformed arguments here is the backend's responsibility;
    /// the failure propagates out of the registry unchanged.
    fn build(args: Self::Args) -> Result<Self>;

    /// Snapshot the current value.
    fn value(&self) -> MetricValue;
}

/// A not-yet-registered family definition.
///
/// The factory produces it, the registry assigns the (canonical) name, and
/// the backend registry consumes it whole.
pub struct FamilyBuilder<M> {
    pub name: String,
    pub help: String,
    marker: PhantomData<fn() -> M>,
}

impl<M: Metric> FamilyBuilder<M> {
    /// Create an unconfigured builder.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            help: String::new(),
            marker: PhantomData,
        }
    }

    /// Set the family name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }
}

impl<M: Metric> Default for FamilyBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces a fresh, unconfigured builder for a metric family.
///
/// Injected at registry construction and invoked once per distinct family.
/// This is where per-family configuration that isn't the name (help text,
/// say) comes from.
pub trait FamilyFactory<M: Metric>: Send + Sync {
    fn builder(&self) -> FamilyBuilder<M>;
}

/// Factory with no extra configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl<M: Metric> FamilyFactory<M> for DefaultFactory {
    fn builder(&self) -> FamilyBuilder<M> {
        FamilyBuilder::new()
    }
}

/// Adapter turning a plain function into a [`FamilyFactory`].
///
/// ```rust
/// use muninn::{FamilyBuilder, FnFactory, Histogram};
///
/// let factory = FnFactory(|| FamilyBuilder::<Histogram>::new().help("Request latency."));
/// ```
pub struct FnFactory<F>(pub F);

impl<M, F> FamilyFactory<M> for FnFactory<F>
where
    M: Metric,
    F: Fn() -> FamilyBuilder<M> + Send + Sync,
{
    fn builder(&self) -> FamilyBuilder<M> {
        (self.0)()
    }
}

/// Durable owner of registered families.
///
/// Accepts a fully-configured builder and returns a live family handle. The
/// backend owns every family for the life of the process; callers hold only
/// shared handles.
pub trait FamilyRegistry<M: Metric>: Send + Sync {
    fn register(&self, builder: FamilyBuilder<M>) -> Result<Arc<dyn FamilyHandle<M>>>;
}

/// A registered, not-yet-labeled metric definition.
pub trait FamilyHandle<M: Metric>: std::fmt::Debug + Send + Sync {
    /// The name the family was registered under.
    fn name(&self) -> &str;

    /// Get or add the labeled instance for `labels`.
    ///
    /// Adding a label set the family already holds returns the existing
    /// instance and drops `args` unused, so racing creators can safely
    /// discard the loser.
    fn add(&self, labels: &LabelSet, args: M::Args) -> Result<Arc<M>>;
}
